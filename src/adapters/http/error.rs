//! Shared HTTP error envelope and tenancy error mapping.
//!
//! Every error body uses the same `{ "error", "code" }` shape so
//! clients can branch on `code` without parsing prose.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::domain::tenancy::TenancyError;

/// JSON error body returned by all endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: code.into(),
        }
    }
}

/// API error type that converts tenancy errors to HTTP responses.
pub struct ApiError(TenancyError);

impl From<TenancyError> for ApiError {
    fn from(err: TenancyError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// The uniform denial body: missing workspace, non-member, and
    /// insufficient role all render identically.
    pub fn not_found() -> axum::response::Response {
        let body = ErrorResponse::new("WORKSPACE_NOT_FOUND", "Workspace not found");
        (StatusCode::NOT_FOUND, Json(body)).into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, code) = match &self.0 {
            TenancyError::WorkspaceNotFound => (StatusCode::NOT_FOUND, "WORKSPACE_NOT_FOUND"),
            TenancyError::MembershipNotFound => (StatusCode::NOT_FOUND, "MEMBERSHIP_NOT_FOUND"),
            TenancyError::AlreadyMember { .. } => (StatusCode::CONFLICT, "MEMBERSHIP_EXISTS"),
            TenancyError::CannotRemoveOwner => (StatusCode::CONFLICT, "CANNOT_REMOVE_OWNER"),
            TenancyError::CannotChangeOwnerRole => {
                (StatusCode::CONFLICT, "CANNOT_CHANGE_OWNER_ROLE")
            }
            TenancyError::InvalidRole(_) => (StatusCode::BAD_REQUEST, "INVALID_ROLE"),
            TenancyError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_FAILED"),
            TenancyError::Infrastructure(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        // Infrastructure detail stays in the logs, not the response.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self.0, "request failed");
            "Internal server error".to_string()
        } else {
            self.0.to_string()
        };

        let body = ErrorResponse::new(code, message);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_protection_maps_to_conflict() {
        let response = ApiError::from(TenancyError::CannotRemoveOwner).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn infrastructure_detail_is_not_leaked() {
        let err = TenancyError::infrastructure("connection refused on 10.0.0.3");
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
