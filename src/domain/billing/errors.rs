//! Billing error types.
//!
//! Covers signature verification, payload parsing, and the storage
//! failures that can occur while recording events. Carries HTTP status
//! mapping because the status code is what drives the provider's retry
//! behavior.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that occur while verifying or processing a billing event.
#[derive(Debug, Error)]
pub enum BillingError {
    /// Signature verification failed.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Event timestamp is older than the acceptable window.
    #[error("Timestamp out of range")]
    TimestampOutOfRange,

    /// Event timestamp is in the future beyond clock skew tolerance.
    #[error("Invalid timestamp")]
    InvalidTimestamp,

    /// Failed to parse the payload or signature header.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Required field missing from the event payload.
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(String),

    /// Payment provider API call failed.
    #[error("Provider error: {0}")]
    Provider(String),
}

impl BillingError {
    /// Returns true if the provider should retry delivering the event.
    ///
    /// Only temporary failures qualify; verification failures never do.
    pub fn is_retryable(&self) -> bool {
        matches!(self, BillingError::Database(_) | BillingError::Provider(_))
    }

    /// Maps the error to the HTTP status returned to the provider.
    ///
    /// 4xx tells the provider to stop retrying; 5xx invites a retry.
    pub fn status_code(&self) -> StatusCode {
        match self {
            BillingError::InvalidSignature
            | BillingError::TimestampOutOfRange
            | BillingError::InvalidTimestamp => StatusCode::UNAUTHORIZED,
            BillingError::ParseError(_) | BillingError::MissingField(_) => StatusCode::BAD_REQUEST,
            BillingError::Database(_) | BillingError::Provider(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
