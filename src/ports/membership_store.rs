//! Membership persistence port.
//!
//! The owner-protection rules live behind this port on purpose: the
//! owner check and the mutation must happen in one atomic unit, so a
//! concurrent interleaving can never observe an ownerless workspace.

use async_trait::async_trait;

use crate::domain::foundation::{UserId, WorkspaceId};
use crate::domain::tenancy::{Membership, Role, TenancyError};

/// Port for membership persistence.
#[async_trait]
pub trait MembershipStore: Send + Sync {
    /// Inserts a new membership.
    ///
    /// Uniqueness on (user, workspace) is decided by the store.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyMember` if a membership for this pair exists.
    async fn insert(&self, membership: &Membership) -> Result<(), TenancyError>;

    /// Loads the membership for a user in a workspace.
    async fn find(
        &self,
        user_id: &UserId,
        workspace_id: &WorkspaceId,
    ) -> Result<Option<Membership>, TenancyError>;

    /// Removes a non-owner membership.
    ///
    /// The owner check is part of the delete itself, not a separate
    /// read, so it cannot race with other mutations.
    ///
    /// # Errors
    ///
    /// - `CannotRemoveOwner` if the membership carries the owner flag
    /// - `MembershipNotFound` if no membership exists for the pair
    async fn remove(
        &self,
        user_id: &UserId,
        workspace_id: &WorkspaceId,
    ) -> Result<(), TenancyError>;

    /// Changes the role of a non-owner membership.
    ///
    /// # Errors
    ///
    /// - `CannotChangeOwnerRole` if the membership carries the owner flag
    /// - `MembershipNotFound` if no membership exists for the pair
    async fn update_role(
        &self,
        user_id: &UserId,
        workspace_id: &WorkspaceId,
        role: Role,
    ) -> Result<(), TenancyError>;

    /// Lists all memberships of a workspace.
    async fn list_for_workspace(
        &self,
        workspace_id: &WorkspaceId,
    ) -> Result<Vec<Membership>, TenancyError>;
}
