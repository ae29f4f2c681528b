//! HTTP mapping for [`PortalError`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::common::{AuthError, PortalError};

/// Body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub level: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

impl PortalError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PortalError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            PortalError::InvalidStatus(_) => StatusCode::BAD_REQUEST,
            PortalError::Conflict(_) => StatusCode::CONFLICT,
            PortalError::NotFound(_) => StatusCode::NOT_FOUND,
            PortalError::Auth(AuthError::PermissionDenied(_)) => StatusCode::FORBIDDEN,
            PortalError::Auth(_) => StatusCode::UNAUTHORIZED,
            PortalError::Database(_) | PortalError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            PortalError::Validation { field, message } => ErrorBody {
                level: "error",
                message: message.clone(),
                field: Some(*field),
            },
            PortalError::InvalidStatus(message) | PortalError::Conflict(message) => ErrorBody {
                level: "warning",
                message: message.clone(),
                field: None,
            },
            PortalError::Database(_) | PortalError::Internal(_) => ErrorBody {
                level: "error",
                message: "Internal server error".to_string(),
                field: None,
            },
            other => ErrorBody {
                level: "error",
                message: other.to_string(),
                field: None,
            },
        }
    }
}

impl IntoResponse for PortalError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = ?self, "Request failed");
        }
        (status, Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Capability;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            PortalError::validation("amount", "bad").status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            PortalError::InvalidStatus("Invalid loan status.".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PortalError::Conflict("dup".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(PortalError::NotFound("Loan").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            PortalError::from(AuthError::PermissionDenied(Capability::SetLoanStatus)).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            PortalError::from(AuthError::InvalidCredentials).status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let body = PortalError::Internal(anyhow::anyhow!("connection refused")).body();
        assert_eq!(body.message, "Internal server error");
    }

    #[test]
    fn test_denial_message_is_explicit() {
        let body = PortalError::from(AuthError::PermissionDenied(Capability::SetLoanStatus)).body();
        assert_eq!(body.message, "You are not authorized to update loan approval status.");
        assert_eq!(body.level, "error");
    }

    #[test]
    fn test_validation_body_names_field() {
        let body = PortalError::validation("amount", "Loan amount must be between Ksh 1000 and Ksh 3000.").body();
        assert_eq!(body.field, Some("amount"));
        assert_eq!(body.level, "error");
    }
}
