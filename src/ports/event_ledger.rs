//! Billing event ledger port.
//!
//! The ledger is the single serialization point for inbound billing
//! events. A delivery claims its event id by inserting a record; the
//! store's uniqueness constraint decides which of N concurrent
//! deliveries wins. The loser sees `AlreadyExists` and acknowledges
//! without reprocessing.

use async_trait::async_trait;

use crate::domain::billing::{BillingError, LedgerRecord};
use crate::domain::foundation::{EventId, Timestamp, WorkspaceId};

/// Result of attempting to claim an event id in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// This delivery inserted the record and owns processing.
    Inserted,
    /// Another delivery already claimed this event id.
    AlreadyExists,
}

/// Port for the processed billing event ledger.
#[async_trait]
pub trait EventLedger: Send + Sync {
    /// Atomically claims an event id by inserting its record.
    ///
    /// Must be conflict-tolerant: a duplicate event id yields
    /// `AlreadyExists`, never an error.
    async fn insert(&self, record: &LedgerRecord) -> Result<InsertOutcome, BillingError>;

    /// Records which workspace a claimed event resolved to.
    async fn mark_resolved(
        &self,
        event_id: &EventId,
        workspace_id: &WorkspaceId,
    ) -> Result<(), BillingError>;

    /// Loads a ledger record by event id.
    async fn find(&self, event_id: &EventId) -> Result<Option<LedgerRecord>, BillingError>;

    /// Deletes records received before the given time (retention).
    ///
    /// Returns the number of records deleted.
    async fn delete_before(&self, cutoff: Timestamp) -> Result<u64, BillingError>;
}
