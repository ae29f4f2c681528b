use axum::{
    extract::{Extension, Path},
    Json,
};

use crate::common::{NotificationId, PortalResult};
use crate::domains::notifications::activities::{fetch_unread, list_notifications, mark_read};
use crate::domains::notifications::{NotificationData, NotificationList};
use crate::server::app::AxumAppState;
use crate::server::middleware::AuthUser;

/// GET /notifications
pub async fn list_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
) -> PortalResult<Json<NotificationList>> {
    Ok(Json(list_notifications(user.user_id, &state.deps).await?))
}

/// GET /notifications/fetch (polled by the navbar badge)
pub async fn fetch_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
) -> PortalResult<Json<NotificationList>> {
    Ok(Json(fetch_unread(user.user_id, &state.deps).await?))
}

/// POST /notifications/read/{id}
pub async fn mark_read_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
    Path(id): Path<NotificationId>,
) -> PortalResult<Json<NotificationData>> {
    Ok(Json(mark_read(user.user_id, id, &state.deps).await?))
}
