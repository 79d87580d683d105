//! Request-scoped access context and denial reasons.

use crate::domain::foundation::{AuthenticatedUser, UserId, WorkspaceId};

use super::{Plan, Role};

/// Proof that a user may act inside a workspace, for one request.
///
/// Built by the tenant resolver after the membership check passed and
/// carried through the request. Holding an `AccessContext` means the
/// caller is an authenticated member of the workspace; role and plan
/// checks read from it without further lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessContext {
    pub user: AuthenticatedUser,
    pub workspace_id: WorkspaceId,
    pub role: Role,
    pub is_owner: bool,
    pub plan: Plan,
}

impl AccessContext {
    /// Returns the acting user's id.
    pub fn user_id(&self) -> &UserId {
        &self.user.id
    }

    /// Returns true if the caller's role meets the minimum requirement.
    pub fn has_role(&self, minimum: Role) -> bool {
        self.role.satisfies(minimum)
    }
}

/// Reason a request was denied before reaching an operation.
///
/// `NotFound` deliberately covers both a missing workspace and a
/// non-member caller: the surfaces render them identically so outsiders
/// cannot probe which workspace ids exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDenied {
    /// No valid session was presented.
    Unauthenticated,
    /// The workspace does not exist, or the caller is not a member of it.
    NotFound,
    /// The caller is a member but their role is insufficient.
    Forbidden,
}
