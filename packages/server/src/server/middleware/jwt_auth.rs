use crate::common::{Actor, AuthError, PortalError, Role, UserId};
use crate::domains::accounts::models::User;
use crate::domains::auth::JwtService;
use axum::{extract::FromRequestParts, http::request::Parts, middleware::Next, response::Response};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, warn};

/// Authenticated user, as currently stored
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: UserId,
    pub username: String,
    pub role: Role,
}

impl AuthUser {
    /// Subject for policy checks
    pub fn actor(&self) -> Actor {
        Actor::new(self.user_id, self.role)
    }
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
            role: user.role,
        }
    }
}

/// JWT authentication middleware
///
/// Extracts JWT token from Authorization header, verifies it, loads the user and
/// adds AuthUser to request extensions.
/// If no token, invalid token or unknown user, request continues without AuthUser (public access).
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    pool: PgPool,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    // Owned, so the request is not borrowed across the lookup
    let token = extract_token(&request).map(str::to_owned);
    let auth_user = match token {
        Some(token) => authenticate(&token, &jwt_service, &pool).await,
        None => None,
    };

    if let Some(user) = auth_user {
        debug!(user_id = %user.user_id, role = %user.role, "Authenticated user");
        request.extensions_mut().insert(user);
    } else {
        debug!("No valid authentication token");
    }

    next.run(request).await
}

/// Extract the raw token from the Authorization header
fn extract_token(request: &axum::http::Request<axum::body::Body>) -> Option<&str> {
    let auth_str = request.headers().get("authorization")?.to_str().ok()?;

    // Handle both "Bearer <token>" and raw token
    Some(auth_str.strip_prefix("Bearer ").unwrap_or(auth_str))
}

/// Verify a raw token and load its user (also used by the SSE endpoint's `?token=`).
///
/// The role is read from the users table on every call, never from the token,
/// so a role change applies to the next request and a deleted user's token is refused.
pub async fn authenticate(token: &str, jwt_service: &JwtService, pool: &PgPool) -> Option<AuthUser> {
    let claims = jwt_service.verify_token(token).ok()?;

    match User::find_by_id(claims.user_id, pool).await {
        Ok(Some(user)) => Some(user.into()),
        Ok(None) => {
            debug!(user_id = %claims.user_id, "Token for unknown user");
            None
        }
        Err(e) => {
            warn!(user_id = %claims.user_id, error = %e, "Failed to load authenticated user");
            None
        }
    }
}

/// Handlers that take `AuthUser` reject anonymous requests with 401.
impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = PortalError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(PortalError::Auth(AuthError::AuthenticationRequired))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    fn request_with(auth: Option<&str>) -> axum::http::Request<axum::body::Body> {
        let mut builder = axum::http::Request::builder();
        if let Some(value) = auth {
            builder = builder.header("authorization", value);
        }
        builder.body(axum::body::Body::empty()).unwrap()
    }

    #[test]
    fn test_extract_token_with_bearer() {
        let request = request_with(Some("Bearer abc.def.ghi"));
        assert_eq!(extract_token(&request), Some("abc.def.ghi"));
    }

    #[test]
    fn test_extract_token_without_bearer() {
        let request = request_with(Some("abc.def.ghi"));
        assert_eq!(extract_token(&request), Some("abc.def.ghi"));
    }

    #[test]
    fn test_no_auth_header() {
        assert!(extract_token(&request_with(None)).is_none());
    }

    #[tokio::test]
    async fn test_invalid_token_is_refused_before_lookup() {
        let jwt_service = JwtService::new("test_secret", "test_issuer".to_string());
        // Never connects: a bad signature is rejected without touching the database
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .unwrap();

        assert!(authenticate("invalid_token", &jwt_service, &pool).await.is_none());
    }

    #[test]
    fn test_actor_uses_stored_role() {
        let auth_user = AuthUser {
            user_id: UserId::new(),
            username: "kamau".to_string(),
            role: Role::Chairperson,
        };
        assert_eq!(auth_user.actor().role(), Role::Chairperson);
        assert_eq!(auth_user.actor().id(), auth_user.user_id);
    }
}
