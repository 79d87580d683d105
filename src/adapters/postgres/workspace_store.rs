//! PostgreSQL implementation of WorkspaceStore.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{Timestamp, WorkspaceId};
use crate::domain::tenancy::{Membership, Plan, TenancyError, Workspace};
use crate::ports::WorkspaceStore;

/// PostgreSQL implementation of the WorkspaceStore port.
pub struct PostgresWorkspaceStore {
    pool: PgPool,
}

impl PostgresWorkspaceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a workspace.
#[derive(Debug, sqlx::FromRow)]
struct WorkspaceRow {
    id: Uuid,
    name: String,
    plan: String,
    billing_customer_ref: Option<String>,
    upgraded_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<WorkspaceRow> for Workspace {
    type Error = TenancyError;

    fn try_from(row: WorkspaceRow) -> Result<Self, Self::Error> {
        Ok(Workspace {
            id: WorkspaceId::from_uuid(row.id),
            name: row.name,
            plan: parse_plan(&row.plan)?,
            billing_customer_ref: row.billing_customer_ref,
            upgraded_at: row.upgraded_at.map(Timestamp::from_datetime),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn parse_plan(s: &str) -> Result<Plan, TenancyError> {
    match s {
        "free" => Ok(Plan::Free),
        "pro" => Ok(Plan::Pro),
        other => Err(TenancyError::infrastructure(format!(
            "Invalid plan value: {}",
            other
        ))),
    }
}

fn db_error(e: sqlx::Error) -> TenancyError {
    TenancyError::infrastructure(format!("Database error: {}", e))
}

#[async_trait]
impl WorkspaceStore for PostgresWorkspaceStore {
    async fn create_with_owner(
        &self,
        workspace: &Workspace,
        owner: &Membership,
    ) -> Result<(), TenancyError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        sqlx::query(
            r#"
            INSERT INTO workspaces (id, name, plan, billing_customer_ref, upgraded_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(workspace.id.as_uuid())
        .bind(&workspace.name)
        .bind(workspace.plan.as_str())
        .bind(&workspace.billing_customer_ref)
        .bind(workspace.upgraded_at.map(|t| *t.as_datetime()))
        .bind(workspace.created_at.as_datetime())
        .bind(workspace.updated_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

        sqlx::query(
            r#"
            INSERT INTO memberships (user_id, workspace_id, role, is_owner, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(owner.user_id.as_str())
        .bind(owner.workspace_id.as_uuid())
        .bind(owner.role.as_str())
        .bind(owner.is_owner)
        .bind(owner.created_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

        tx.commit().await.map_err(db_error)
    }

    async fn find_by_id(&self, id: &WorkspaceId) -> Result<Option<Workspace>, TenancyError> {
        let row: Option<WorkspaceRow> = sqlx::query_as(
            r#"
            SELECT id, name, plan, billing_customer_ref, upgraded_at, created_at, updated_at
            FROM workspaces
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(Workspace::try_from).transpose()
    }

    async fn find_by_customer_ref(
        &self,
        customer_ref: &str,
    ) -> Result<Option<Workspace>, TenancyError> {
        let row: Option<WorkspaceRow> = sqlx::query_as(
            r#"
            SELECT id, name, plan, billing_customer_ref, upgraded_at, created_at, updated_at
            FROM workspaces
            WHERE billing_customer_ref = $1
            "#,
        )
        .bind(customer_ref)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(Workspace::try_from).transpose()
    }

    async fn update(&self, workspace: &Workspace) -> Result<(), TenancyError> {
        let result = sqlx::query(
            r#"
            UPDATE workspaces
            SET name = $2,
                plan = $3,
                billing_customer_ref = $4,
                upgraded_at = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(workspace.id.as_uuid())
        .bind(&workspace.name)
        .bind(workspace.plan.as_str())
        .bind(&workspace.billing_customer_ref)
        .bind(workspace.upgraded_at.map(|t| *t.as_datetime()))
        .bind(workspace.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(TenancyError::WorkspaceNotFound);
        }

        Ok(())
    }
}
