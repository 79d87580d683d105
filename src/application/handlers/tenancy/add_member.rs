//! AddMemberHandler - adds a user to a workspace.

use std::sync::Arc;

use crate::domain::foundation::{UserId, WorkspaceId};
use crate::domain::tenancy::{Membership, Role, TenancyError};
use crate::ports::{MembershipStore, WorkspaceStore};

/// Command to add a member to a workspace.
#[derive(Debug, Clone)]
pub struct AddMemberCommand {
    pub workspace_id: WorkspaceId,
    pub user_id: UserId,
    pub role: Role,
}

/// Handler that adds a non-owner membership.
///
/// Duplicate detection is left to the store's uniqueness constraint so
/// two concurrent adds of the same user cannot both succeed.
pub struct AddMemberHandler {
    workspace_store: Arc<dyn WorkspaceStore>,
    membership_store: Arc<dyn MembershipStore>,
}

impl AddMemberHandler {
    pub fn new(
        workspace_store: Arc<dyn WorkspaceStore>,
        membership_store: Arc<dyn MembershipStore>,
    ) -> Self {
        Self {
            workspace_store,
            membership_store,
        }
    }

    pub async fn handle(&self, cmd: AddMemberCommand) -> Result<Membership, TenancyError> {
        self.workspace_store
            .find_by_id(&cmd.workspace_id)
            .await?
            .ok_or(TenancyError::WorkspaceNotFound)?;

        let membership = Membership::member(cmd.user_id, cmd.workspace_id, cmd.role);
        self.membership_store.insert(&membership).await?;

        tracing::info!(
            workspace_id = %membership.workspace_id,
            user_id = %membership.user_id,
            role = %membership.role,
            "member added"
        );

        Ok(membership)
    }
}
