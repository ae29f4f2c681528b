use thiserror::Error;

use super::Capability;

/// Authorization errors for the portal
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("{}", .0.denial_message())]
    PermissionDenied(Capability),
}
