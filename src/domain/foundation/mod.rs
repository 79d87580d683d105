//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, error types, and the authenticated
//! identity that form the vocabulary of the Workroom domain.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode};
pub use ids::{EventId, UserId, WorkspaceId};
pub use timestamp::Timestamp;
