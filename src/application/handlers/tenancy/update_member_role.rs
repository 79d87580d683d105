//! UpdateMemberRoleHandler - changes a member's role.

use std::sync::Arc;

use crate::domain::foundation::{UserId, WorkspaceId};
use crate::domain::tenancy::{Role, TenancyError};
use crate::ports::MembershipStore;

/// Command to change a member's role.
#[derive(Debug, Clone)]
pub struct UpdateMemberRoleCommand {
    pub workspace_id: WorkspaceId,
    pub user_id: UserId,
    pub role: Role,
}

/// Handler that updates a non-owner membership's role.
///
/// The owner's role is pinned to admin; the store enforces this inside
/// the update itself.
pub struct UpdateMemberRoleHandler {
    membership_store: Arc<dyn MembershipStore>,
}

impl UpdateMemberRoleHandler {
    pub fn new(membership_store: Arc<dyn MembershipStore>) -> Self {
        Self { membership_store }
    }

    pub async fn handle(&self, cmd: UpdateMemberRoleCommand) -> Result<(), TenancyError> {
        self.membership_store
            .update_role(&cmd.user_id, &cmd.workspace_id, cmd.role)
            .await?;

        tracing::info!(
            workspace_id = %cmd.workspace_id,
            user_id = %cmd.user_id,
            role = %cmd.role,
            "member role updated"
        );

        Ok(())
    }
}
