//! Last-used workspace recall port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId, WorkspaceId};

/// Port for remembering a user's most recently used workspace.
///
/// Strictly a UI convenience: the stored value is a hint for the next
/// login, never an input to an access decision. Failures here must not
/// fail the request that triggered the write.
#[async_trait]
pub trait WorkspaceRecall: Send + Sync {
    /// Records the workspace the user just worked in.
    async fn remember(
        &self,
        user_id: &UserId,
        workspace_id: &WorkspaceId,
    ) -> Result<(), DomainError>;

    /// Returns the user's last-used workspace, if one is remembered.
    async fn last_workspace(&self, user_id: &UserId) -> Result<Option<WorkspaceId>, DomainError>;
}
