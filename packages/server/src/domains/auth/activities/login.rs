//! Login activity - username/password exchange for a bearer token

use serde::Serialize;
use tracing::{info, warn};

use crate::common::auth::policy::home_path;
use crate::common::{AuthError, PortalResult, Role, UserId};
use crate::domains::accounts::models::User;
use crate::domains::auth::jwt::JwtService;
use crate::domains::auth::password::verify_password;
use crate::kernel::ServerDeps;

/// Returned by `POST /auth/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginData {
    pub token: String,
    pub user_id: UserId,
    pub username: String,
    pub role: Role,
    /// Dashboard the client should open for this role
    pub redirect_to: &'static str,
}

/// Check credentials and issue a token.
///
/// Unknown usernames and wrong passwords produce the same error.
pub async fn login(
    username: &str,
    password: &str,
    jwt_service: &JwtService,
    deps: &ServerDeps,
) -> PortalResult<LoginData> {
    let user = match User::find_by_username(username.trim(), &deps.db_pool).await? {
        Some(user) if verify_password(password, &user.password_hash) => user,
        _ => {
            warn!(username = %username, "Failed login attempt");
            return Err(AuthError::InvalidCredentials.into());
        }
    };

    let token = jwt_service.create_token(user.id, user.username.clone(), user.role)?;
    info!(user_id = %user.id, role = %user.role, "User logged in");

    Ok(LoginData {
        token,
        user_id: user.id,
        username: user.username,
        role: user.role,
        redirect_to: home_path(user.role),
    })
}
