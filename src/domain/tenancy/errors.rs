//! Tenancy rule violations as typed errors.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, UserId, WorkspaceId};

/// Errors raised by tenancy operations.
///
/// Rule violations carry enough context to render a useful message;
/// infrastructure failures are wrapped rather than leaked as raw driver
/// errors.
#[derive(Debug, Clone, Error)]
pub enum TenancyError {
    /// The user already holds a membership in this workspace.
    #[error("User {user_id} is already a member of workspace {workspace_id}")]
    AlreadyMember {
        user_id: UserId,
        workspace_id: WorkspaceId,
    },

    /// The workspace owner cannot be removed from their workspace.
    #[error("The workspace owner cannot be removed")]
    CannotRemoveOwner,

    /// The workspace owner's role cannot be changed.
    #[error("The workspace owner's role cannot be changed")]
    CannotChangeOwnerRole,

    /// The supplied role string is not a recognized role.
    #[error("Invalid role: {0}")]
    InvalidRole(String),

    /// Input failed validation (empty name, malformed id).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// No workspace exists with the given identifier.
    #[error("Workspace not found")]
    WorkspaceNotFound,

    /// No membership exists for the given user and workspace.
    #[error("Membership not found")]
    MembershipNotFound,

    /// A storage or infrastructure failure occurred.
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl TenancyError {
    /// Creates an invalid-role error for an unrecognized role string.
    pub fn invalid_role(role: impl Into<String>) -> Self {
        Self::InvalidRole(role.into())
    }

    /// Creates a validation error with a message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an infrastructure error with a message.
    pub fn infrastructure(message: impl Into<String>) -> Self {
        Self::Infrastructure(message.into())
    }

    /// Returns the stable error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            TenancyError::AlreadyMember { .. } => ErrorCode::MembershipExists,
            TenancyError::CannotRemoveOwner => ErrorCode::CannotRemoveOwner,
            TenancyError::CannotChangeOwnerRole => ErrorCode::CannotChangeOwnerRole,
            TenancyError::InvalidRole(_) => ErrorCode::InvalidRole,
            TenancyError::Validation(_) => ErrorCode::ValidationFailed,
            TenancyError::WorkspaceNotFound => ErrorCode::WorkspaceNotFound,
            TenancyError::MembershipNotFound => ErrorCode::MembershipNotFound,
            TenancyError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<TenancyError> for DomainError {
    fn from(err: TenancyError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(
            TenancyError::CannotRemoveOwner.code(),
            ErrorCode::CannotRemoveOwner
        );
        assert_eq!(
            TenancyError::invalid_role("root").code(),
            ErrorCode::InvalidRole
        );
        assert_eq!(
            TenancyError::WorkspaceNotFound.code(),
            ErrorCode::WorkspaceNotFound
        );
    }

    #[test]
    fn already_member_message_names_both_ids() {
        let user = UserId::new("user-1").unwrap();
        let workspace = WorkspaceId::new();
        let err = TenancyError::AlreadyMember {
            user_id: user.clone(),
            workspace_id: workspace,
        };
        let msg = err.to_string();
        assert!(msg.contains("user-1"));
        assert!(msg.contains(&workspace.to_string()));
    }

    #[test]
    fn converts_to_domain_error_with_matching_code() {
        let domain: DomainError = TenancyError::MembershipNotFound.into();
        assert_eq!(domain.code, ErrorCode::MembershipNotFound);
    }
}
