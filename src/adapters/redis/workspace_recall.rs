//! Redis-backed workspace recall for multi-server deployments.
//!
//! Stores the last-used workspace id per user under a TTL'd key. The
//! value is a pure convenience hint; losing it costs the user one extra
//! workspace picker screen, nothing more.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::domain::foundation::{DomainError, UserId, WorkspaceId};
use crate::ports::WorkspaceRecall;

/// Keys expire after 30 days of inactivity.
const RECALL_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// Redis implementation of the WorkspaceRecall port.
#[derive(Clone)]
pub struct RedisWorkspaceRecall {
    conn: MultiplexedConnection,
}

impl RedisWorkspaceRecall {
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self { conn }
    }

    fn key(user_id: &UserId) -> String {
        format!("workspace_recall:{}", user_id)
    }
}

#[async_trait]
impl WorkspaceRecall for RedisWorkspaceRecall {
    async fn remember(
        &self,
        user_id: &UserId,
        workspace_id: &WorkspaceId,
    ) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();

        conn.set_ex::<_, _, ()>(
            Self::key(user_id),
            workspace_id.to_string(),
            RECALL_TTL_SECS,
        )
        .await
        .map_err(|e: redis::RedisError| DomainError::cache(e.to_string()))?;

        Ok(())
    }

    async fn last_workspace(&self, user_id: &UserId) -> Result<Option<WorkspaceId>, DomainError> {
        let mut conn = self.conn.clone();

        let value: Option<String> = conn
            .get(Self::key(user_id))
            .await
            .map_err(|e: redis::RedisError| DomainError::cache(e.to_string()))?;

        // A corrupt value is treated as absent rather than an error.
        Ok(value.and_then(|v| v.parse().ok()))
    }
}
