//! RemoveMemberHandler - removes a user from a workspace.

use std::sync::Arc;

use crate::domain::foundation::{UserId, WorkspaceId};
use crate::domain::tenancy::TenancyError;
use crate::ports::MembershipStore;

/// Command to remove a member from a workspace.
#[derive(Debug, Clone)]
pub struct RemoveMemberCommand {
    pub workspace_id: WorkspaceId,
    pub user_id: UserId,
}

/// Handler that removes a non-owner membership.
///
/// The owner check happens inside the store's delete so it cannot race
/// with a concurrent mutation; this handler never observes a window
/// where the workspace has no owner.
pub struct RemoveMemberHandler {
    membership_store: Arc<dyn MembershipStore>,
}

impl RemoveMemberHandler {
    pub fn new(membership_store: Arc<dyn MembershipStore>) -> Self {
        Self { membership_store }
    }

    pub async fn handle(&self, cmd: RemoveMemberCommand) -> Result<(), TenancyError> {
        self.membership_store
            .remove(&cmd.user_id, &cmd.workspace_id)
            .await?;

        tracing::info!(
            workspace_id = %cmd.workspace_id,
            user_id = %cmd.user_id,
            "member removed"
        );

        Ok(())
    }
}
