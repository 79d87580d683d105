//! In-memory workspace store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::WorkspaceId;
use crate::domain::tenancy::{Membership, TenancyError, Workspace};
use crate::ports::{MembershipStore, WorkspaceStore};

use super::InMemoryMembershipStore;

/// Map-backed workspace store.
///
/// Shares a membership store so `create_with_owner` lands the owner
/// membership in the same place the rest of the suite reads from.
pub struct InMemoryWorkspaceStore {
    workspaces: RwLock<HashMap<WorkspaceId, Workspace>>,
    memberships: Arc<InMemoryMembershipStore>,
}

impl InMemoryWorkspaceStore {
    pub fn new() -> Self {
        Self::with_memberships(Arc::new(InMemoryMembershipStore::new()))
    }

    /// Builds a store that writes owner memberships into a shared
    /// membership store.
    pub fn with_memberships(memberships: Arc<InMemoryMembershipStore>) -> Self {
        Self {
            workspaces: RwLock::new(HashMap::new()),
            memberships,
        }
    }

    /// Returns the membership store this workspace store writes to.
    pub fn memberships(&self) -> Arc<InMemoryMembershipStore> {
        self.memberships.clone()
    }
}

impl Default for InMemoryWorkspaceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WorkspaceStore for InMemoryWorkspaceStore {
    async fn create_with_owner(
        &self,
        workspace: &Workspace,
        owner: &Membership,
    ) -> Result<(), TenancyError> {
        let mut workspaces = self.workspaces.write().await;
        if workspaces.contains_key(&workspace.id) {
            return Err(TenancyError::infrastructure("workspace id collision"));
        }
        self.memberships.insert(owner).await?;
        workspaces.insert(workspace.id, workspace.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &WorkspaceId) -> Result<Option<Workspace>, TenancyError> {
        let workspaces = self.workspaces.read().await;
        Ok(workspaces.get(id).cloned())
    }

    async fn find_by_customer_ref(
        &self,
        customer_ref: &str,
    ) -> Result<Option<Workspace>, TenancyError> {
        let workspaces = self.workspaces.read().await;
        Ok(workspaces
            .values()
            .find(|w| w.billing_customer_ref.as_deref() == Some(customer_ref))
            .cloned())
    }

    async fn update(&self, workspace: &Workspace) -> Result<(), TenancyError> {
        let mut workspaces = self.workspaces.write().await;
        match workspaces.get_mut(&workspace.id) {
            None => Err(TenancyError::WorkspaceNotFound),
            Some(existing) => {
                *existing = workspace.clone();
                Ok(())
            }
        }
    }
}
