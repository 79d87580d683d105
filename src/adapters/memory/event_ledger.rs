//! In-memory billing event ledger.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::billing::{BillingError, LedgerRecord};
use crate::domain::foundation::{EventId, Timestamp, WorkspaceId};
use crate::ports::{EventLedger, InsertOutcome};

/// Map-backed event ledger.
///
/// The check and the insert happen under one write lock, giving the
/// same claim semantics as the postgres adapter's conflict-tolerant
/// insert.
pub struct InMemoryEventLedger {
    records: RwLock<HashMap<EventId, LedgerRecord>>,
}

impl InMemoryEventLedger {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryEventLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventLedger for InMemoryEventLedger {
    async fn insert(&self, record: &LedgerRecord) -> Result<InsertOutcome, BillingError> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.event_id) {
            return Ok(InsertOutcome::AlreadyExists);
        }
        records.insert(record.event_id.clone(), record.clone());
        Ok(InsertOutcome::Inserted)
    }

    async fn mark_resolved(
        &self,
        event_id: &EventId,
        workspace_id: &WorkspaceId,
    ) -> Result<(), BillingError> {
        let mut records = self.records.write().await;
        if let Some(record) = records.get_mut(event_id) {
            record.workspace_id = Some(*workspace_id);
        }
        Ok(())
    }

    async fn find(&self, event_id: &EventId) -> Result<Option<LedgerRecord>, BillingError> {
        let records = self.records.read().await;
        Ok(records.get(event_id).cloned())
    }

    async fn delete_before(&self, cutoff: Timestamp) -> Result<u64, BillingError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| !record.received_at.is_before(&cutoff));
        Ok((before - records.len()) as u64)
    }
}
