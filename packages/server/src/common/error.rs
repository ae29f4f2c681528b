use thiserror::Error;

use super::auth::AuthError;
use super::vocabulary::ParseEnumError;

/// Errors surfaced by portal activities.
///
/// Each variant maps to one user-visible outcome; the HTTP mapping lives in
/// `server::error`.
#[derive(Error, Debug)]
pub enum PortalError {
    /// A form field failed validation.
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// A status path segment outside the entity's vocabulary. No state changes.
    #[error("{0}")]
    InvalidStatus(String),

    /// The request conflicts with existing state (e.g. an unpaid loan).
    #[error("{0}")]
    Conflict(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type PortalResult<T> = Result<T, PortalError>;

impl PortalError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}

impl From<ParseEnumError> for PortalError {
    fn from(err: ParseEnumError) -> Self {
        Self::InvalidStatus(format!("Invalid {}.", err.kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_becomes_invalid_status() {
        let err: PortalError = ParseEnumError {
            kind: "welfare status",
            value: "not_paid".into(),
        }
        .into();

        assert!(matches!(err, PortalError::InvalidStatus(ref msg) if msg == "Invalid welfare status."));
    }
}
