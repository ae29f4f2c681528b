use axum::{
    extract::{Extension, Path},
    Json,
};

use crate::common::{Confirmed, ContributionId, PortalResult};
use crate::domains::contributions::activities::{record_contribution, set_contribution_status};
use crate::domains::contributions::{ContributionData, ContributionForm};
use crate::server::app::AxumAppState;
use crate::server::middleware::AuthUser;

pub async fn record_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
    Json(form): Json<ContributionForm>,
) -> PortalResult<Json<Confirmed<ContributionData>>> {
    Ok(Json(record_contribution(user.actor(), form, &state.deps).await?))
}

pub async fn set_status_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
    Path((id, status)): Path<(ContributionId, String)>,
) -> PortalResult<Json<Confirmed<ContributionData>>> {
    Ok(Json(
        set_contribution_status(user.actor(), id, &status, &state.deps).await?,
    ))
}
