//! CreateWorkspaceHandler - provisions a workspace with its owner.

use std::sync::Arc;

use crate::domain::foundation::{UserId, WorkspaceId};
use crate::domain::tenancy::{Membership, TenancyError, Workspace};
use crate::ports::WorkspaceStore;

/// Command to create a workspace.
#[derive(Debug, Clone)]
pub struct CreateWorkspaceCommand {
    /// Display name for the new workspace.
    pub name: String,
    /// User who becomes the owner.
    pub owner_id: UserId,
}

/// Handler that creates a workspace and its owning membership.
///
/// The workspace and the owner membership are persisted in one atomic
/// unit; there is no moment where the workspace exists without an
/// owner. New workspaces always start on the free plan.
pub struct CreateWorkspaceHandler {
    workspace_store: Arc<dyn WorkspaceStore>,
}

impl CreateWorkspaceHandler {
    pub fn new(workspace_store: Arc<dyn WorkspaceStore>) -> Self {
        Self { workspace_store }
    }

    pub async fn handle(&self, cmd: CreateWorkspaceCommand) -> Result<Workspace, TenancyError> {
        let name = cmd.name.trim();
        if name.is_empty() {
            return Err(TenancyError::validation("workspace name must not be empty"));
        }

        let workspace = Workspace::create(WorkspaceId::new(), name);
        let owner = Membership::owner(cmd.owner_id, workspace.id);

        self.workspace_store
            .create_with_owner(&workspace, &owner)
            .await?;

        tracing::info!(workspace_id = %workspace.id, owner_id = %owner.user_id, "workspace created");

        Ok(workspace)
    }
}
