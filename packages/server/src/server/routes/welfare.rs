use axum::{
    extract::{Extension, Path},
    Json,
};

use crate::common::{Confirmed, PortalResult, WelfareId};
use crate::domains::welfare::activities::{record_welfare, set_welfare_status};
use crate::domains::welfare::{WelfareData, WelfareForm};
use crate::server::app::AxumAppState;
use crate::server::middleware::AuthUser;
use crate::server::routes::today;

pub async fn record_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
    Json(form): Json<WelfareForm>,
) -> PortalResult<Json<Confirmed<WelfareData>>> {
    Ok(Json(
        record_welfare(user.actor(), form, today(), &state.deps).await?,
    ))
}

pub async fn set_status_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
    Path((id, status)): Path<(WelfareId, String)>,
) -> PortalResult<Json<Confirmed<WelfareData>>> {
    Ok(Json(
        set_welfare_status(user.actor(), id, &status, &state.deps).await?,
    ))
}
