use axum::{
    extract::{Extension, Path},
    Json,
};

use crate::common::{AnnouncementId, Confirmed, PortalResult};
use crate::domains::announcements::activities::{get_announcement, post_announcement};
use crate::domains::announcements::{AnnouncementData, AnnouncementForm};
use crate::server::app::AxumAppState;
use crate::server::middleware::AuthUser;

/// POST /post-announcement
pub async fn post_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
    Json(form): Json<AnnouncementForm>,
) -> PortalResult<Json<Confirmed<AnnouncementData>>> {
    Ok(Json(post_announcement(user.actor(), form, &state.deps).await?))
}

/// GET /announcements/{id}/ (target of the notification link)
pub async fn detail_handler(
    Extension(state): Extension<AxumAppState>,
    _user: AuthUser,
    Path(id): Path<AnnouncementId>,
) -> PortalResult<Json<AnnouncementData>> {
    Ok(Json(get_announcement(id, &state.deps).await?))
}
