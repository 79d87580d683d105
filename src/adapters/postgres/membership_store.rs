//! PostgreSQL implementation of MembershipStore.
//!
//! Owner protection is folded into the mutating statements themselves
//! (`AND is_owner = FALSE`), so the check and the mutation are one
//! atomic statement and cannot race.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{Timestamp, UserId, WorkspaceId};
use crate::domain::tenancy::{Membership, Role, TenancyError};
use crate::ports::MembershipStore;

/// PostgreSQL implementation of the MembershipStore port.
pub struct PostgresMembershipStore {
    pool: PgPool,
}

impl PostgresMembershipStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Distinguishes "membership missing" from "membership is owned"
    /// after a conditional mutation touched zero rows.
    async fn classify_untouched(
        &self,
        user_id: &UserId,
        workspace_id: &WorkspaceId,
        owner_error: TenancyError,
    ) -> TenancyError {
        let row: Result<Option<(bool,)>, sqlx::Error> = sqlx::query_as(
            "SELECT is_owner FROM memberships WHERE user_id = $1 AND workspace_id = $2",
        )
        .bind(user_id.as_str())
        .bind(workspace_id.as_uuid())
        .fetch_optional(&self.pool)
        .await;

        match row {
            Ok(Some((true,))) => owner_error,
            Ok(Some((false,))) | Ok(None) => TenancyError::MembershipNotFound,
            Err(e) => db_error(e),
        }
    }
}

/// Database row representation of a membership.
#[derive(Debug, sqlx::FromRow)]
struct MembershipRow {
    user_id: String,
    workspace_id: Uuid,
    role: String,
    is_owner: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<MembershipRow> for Membership {
    type Error = TenancyError;

    fn try_from(row: MembershipRow) -> Result<Self, Self::Error> {
        let user_id = UserId::new(&row.user_id)
            .ok_or_else(|| TenancyError::infrastructure("Empty user_id in memberships row"))?;

        Ok(Membership {
            user_id,
            workspace_id: WorkspaceId::from_uuid(row.workspace_id),
            role: parse_role(&row.role)?,
            is_owner: row.is_owner,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

fn parse_role(s: &str) -> Result<Role, TenancyError> {
    s.parse()
        .map_err(|_| TenancyError::infrastructure(format!("Invalid role value: {}", s)))
}

fn db_error(e: sqlx::Error) -> TenancyError {
    TenancyError::infrastructure(format!("Database error: {}", e))
}

#[async_trait]
impl MembershipStore for PostgresMembershipStore {
    async fn insert(&self, membership: &Membership) -> Result<(), TenancyError> {
        let result = sqlx::query(
            r#"
            INSERT INTO memberships (user_id, workspace_id, role, is_owner, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id, workspace_id) DO NOTHING
            "#,
        )
        .bind(membership.user_id.as_str())
        .bind(membership.workspace_id.as_uuid())
        .bind(membership.role.as_str())
        .bind(membership.is_owner)
        .bind(membership.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(TenancyError::AlreadyMember {
                user_id: membership.user_id.clone(),
                workspace_id: membership.workspace_id,
            });
        }

        Ok(())
    }

    async fn find(
        &self,
        user_id: &UserId,
        workspace_id: &WorkspaceId,
    ) -> Result<Option<Membership>, TenancyError> {
        let row: Option<MembershipRow> = sqlx::query_as(
            r#"
            SELECT user_id, workspace_id, role, is_owner, created_at
            FROM memberships
            WHERE user_id = $1 AND workspace_id = $2
            "#,
        )
        .bind(user_id.as_str())
        .bind(workspace_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(Membership::try_from).transpose()
    }

    async fn remove(
        &self,
        user_id: &UserId,
        workspace_id: &WorkspaceId,
    ) -> Result<(), TenancyError> {
        let result = sqlx::query(
            r#"
            DELETE FROM memberships
            WHERE user_id = $1 AND workspace_id = $2 AND is_owner = FALSE
            "#,
        )
        .bind(user_id.as_str())
        .bind(workspace_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(self
                .classify_untouched(user_id, workspace_id, TenancyError::CannotRemoveOwner)
                .await);
        }

        Ok(())
    }

    async fn update_role(
        &self,
        user_id: &UserId,
        workspace_id: &WorkspaceId,
        role: Role,
    ) -> Result<(), TenancyError> {
        let result = sqlx::query(
            r#"
            UPDATE memberships
            SET role = $3
            WHERE user_id = $1 AND workspace_id = $2 AND is_owner = FALSE
            "#,
        )
        .bind(user_id.as_str())
        .bind(workspace_id.as_uuid())
        .bind(role.as_str())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(self
                .classify_untouched(user_id, workspace_id, TenancyError::CannotChangeOwnerRole)
                .await);
        }

        Ok(())
    }

    async fn list_for_workspace(
        &self,
        workspace_id: &WorkspaceId,
    ) -> Result<Vec<Membership>, TenancyError> {
        let rows: Vec<MembershipRow> = sqlx::query_as(
            r#"
            SELECT user_id, workspace_id, role, is_owner, created_at
            FROM memberships
            WHERE workspace_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(workspace_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(Membership::try_from).collect()
    }
}
