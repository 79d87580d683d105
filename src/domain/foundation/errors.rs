//! Error types for the domain layer.

use std::error::Error;
use std::fmt;

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    InvalidRole,

    // Not found errors
    WorkspaceNotFound,
    MembershipNotFound,

    // Tenancy rule violations
    MembershipExists,
    CannotRemoveOwner,
    CannotChangeOwnerRole,

    // Authorization errors
    Unauthenticated,
    Forbidden,
    PaymentRequired,

    // Billing errors
    VerificationFailed,

    // Infrastructure errors
    DatabaseError,
    CacheError,
    ExternalServiceError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InvalidRole => "INVALID_ROLE",
            ErrorCode::WorkspaceNotFound => "WORKSPACE_NOT_FOUND",
            ErrorCode::MembershipNotFound => "MEMBERSHIP_NOT_FOUND",
            ErrorCode::MembershipExists => "MEMBERSHIP_EXISTS",
            ErrorCode::CannotRemoveOwner => "CANNOT_REMOVE_OWNER",
            ErrorCode::CannotChangeOwnerRole => "CANNOT_CHANGE_OWNER_ROLE",
            ErrorCode::Unauthenticated => "UNAUTHENTICATED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::PaymentRequired => "PAYMENT_REQUIRED",
            ErrorCode::VerificationFailed => "VERIFICATION_FAILED",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::CacheError => "CACHE_ERROR",
            ErrorCode::ExternalServiceError => "EXTERNAL_SERVICE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code and message.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Creates a database infrastructure error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Creates a cache infrastructure error.
    pub fn cache(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::CacheError, message)
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}
