//! In-memory workspace recall.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId, WorkspaceId};
use crate::ports::WorkspaceRecall;

/// Map-backed workspace recall, no expiry.
pub struct InMemoryWorkspaceRecall {
    entries: RwLock<HashMap<UserId, WorkspaceId>>,
}

impl InMemoryWorkspaceRecall {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryWorkspaceRecall {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WorkspaceRecall for InMemoryWorkspaceRecall {
    async fn remember(
        &self,
        user_id: &UserId,
        workspace_id: &WorkspaceId,
    ) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        entries.insert(user_id.clone(), *workspace_id);
        Ok(())
    }

    async fn last_workspace(&self, user_id: &UserId) -> Result<Option<WorkspaceId>, DomainError> {
        let entries = self.entries.read().await;
        Ok(entries.get(user_id).copied())
    }
}
