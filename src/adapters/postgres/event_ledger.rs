//! PostgreSQL implementation of EventLedger.
//!
//! The `ON CONFLICT DO NOTHING` insert is the claim: the primary key on
//! `event_id` decides which of N concurrent deliveries wins, and zero
//! affected rows means some other delivery already holds the claim.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::billing::{BillingError, LedgerRecord};
use crate::domain::foundation::{EventId, Timestamp, WorkspaceId};
use crate::ports::{EventLedger, InsertOutcome};

/// PostgreSQL implementation of the EventLedger port.
pub struct PostgresEventLedger {
    pool: PgPool,
}

impl PostgresEventLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a ledger record.
#[derive(Debug, sqlx::FromRow)]
struct LedgerRow {
    event_id: String,
    event_type: String,
    workspace_id: Option<Uuid>,
    received_at: DateTime<Utc>,
}

impl From<LedgerRow> for LedgerRecord {
    fn from(row: LedgerRow) -> Self {
        LedgerRecord {
            event_id: EventId::new(row.event_id),
            event_type: row.event_type,
            workspace_id: row.workspace_id.map(WorkspaceId::from_uuid),
            received_at: Timestamp::from_datetime(row.received_at),
        }
    }
}

fn db_error(e: sqlx::Error) -> BillingError {
    BillingError::Database(e.to_string())
}

#[async_trait]
impl EventLedger for PostgresEventLedger {
    async fn insert(&self, record: &LedgerRecord) -> Result<InsertOutcome, BillingError> {
        let result = sqlx::query(
            r#"
            INSERT INTO billing_event_ledger (event_id, event_type, workspace_id, received_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (event_id) DO NOTHING
            "#,
        )
        .bind(record.event_id.as_str())
        .bind(&record.event_type)
        .bind(record.workspace_id.map(|id| *id.as_uuid()))
        .bind(record.received_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            Ok(InsertOutcome::AlreadyExists)
        } else {
            Ok(InsertOutcome::Inserted)
        }
    }

    async fn mark_resolved(
        &self,
        event_id: &EventId,
        workspace_id: &WorkspaceId,
    ) -> Result<(), BillingError> {
        sqlx::query("UPDATE billing_event_ledger SET workspace_id = $2 WHERE event_id = $1")
            .bind(event_id.as_str())
            .bind(workspace_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(())
    }

    async fn find(&self, event_id: &EventId) -> Result<Option<LedgerRecord>, BillingError> {
        let row: Option<LedgerRow> = sqlx::query_as(
            r#"
            SELECT event_id, event_type, workspace_id, received_at
            FROM billing_event_ledger
            WHERE event_id = $1
            "#,
        )
        .bind(event_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.map(LedgerRecord::from))
    }

    async fn delete_before(&self, cutoff: Timestamp) -> Result<u64, BillingError> {
        let result = sqlx::query("DELETE FROM billing_event_ledger WHERE received_at < $1")
            .bind(cutoff.as_datetime())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected())
    }
}
