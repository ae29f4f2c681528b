use axum::{extract::Extension, Json};

use crate::common::PortalResult;
use crate::domains::dashboard::activities::{committee_dashboard, member_dashboard};
use crate::domains::dashboard::{CommitteeDashboard, MemberDashboard};
use crate::server::app::AxumAppState;
use crate::server::middleware::AuthUser;
use crate::server::routes::today;

pub async fn member_dashboard_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
) -> PortalResult<Json<MemberDashboard>> {
    Ok(Json(member_dashboard(user.user_id, today(), &state.deps).await?))
}

pub async fn committee_dashboard_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
) -> PortalResult<Json<CommitteeDashboard>> {
    Ok(Json(
        committee_dashboard(user.actor(), today(), &state.deps).await?,
    ))
}
