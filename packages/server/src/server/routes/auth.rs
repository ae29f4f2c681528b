use axum::{extract::Extension, Json};
use serde::Deserialize;

use crate::common::PortalResult;
use crate::domains::auth::{login, LoginData};
use crate::server::app::AxumAppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /auth/login
pub async fn login_handler(
    Extension(state): Extension<AxumAppState>,
    Json(request): Json<LoginRequest>,
) -> PortalResult<Json<LoginData>> {
    let data = login(
        &request.username,
        &request.password,
        &state.jwt_service,
        &state.deps,
    )
    .await?;
    Ok(Json(data))
}
