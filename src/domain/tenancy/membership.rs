//! Membership join entity linking users to workspaces.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId, WorkspaceId};

use super::Role;

/// A user's membership in a workspace.
///
/// At most one membership exists per (user, workspace) pair. Exactly one
/// membership per workspace carries the owner flag; the owner is always
/// an admin and can be neither removed nor demoted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub user_id: UserId,
    pub workspace_id: WorkspaceId,
    pub role: Role,
    pub is_owner: bool,
    pub created_at: Timestamp,
}

impl Membership {
    /// Creates the owning membership for a freshly created workspace.
    ///
    /// Owners are always admins; the role is not caller-selectable.
    pub fn owner(user_id: UserId, workspace_id: WorkspaceId) -> Self {
        Self {
            user_id,
            workspace_id,
            role: Role::Admin,
            is_owner: true,
            created_at: Timestamp::now(),
        }
    }

    /// Creates a regular (non-owner) membership at the given role.
    pub fn member(user_id: UserId, workspace_id: WorkspaceId, role: Role) -> Self {
        Self {
            user_id,
            workspace_id,
            role,
            is_owner: false,
            created_at: Timestamp::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    #[test]
    fn owner_is_always_admin() {
        let m = Membership::owner(user(), WorkspaceId::new());
        assert!(m.is_owner);
        assert_eq!(m.role, Role::Admin);
    }

    #[test]
    fn member_is_never_owner() {
        let m = Membership::member(user(), WorkspaceId::new(), Role::Admin);
        assert!(!m.is_owner);
        assert_eq!(m.role, Role::Admin);
    }
}
