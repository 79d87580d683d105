//! Event ledger record.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EventId, Timestamp, WorkspaceId};

use super::BillingEvent;

/// One processed-event row in the billing event ledger.
///
/// The ledger is the idempotency backbone for inbound billing events:
/// the record is inserted before any state change is attempted, and a
/// uniqueness conflict on `event_id` means another delivery of the same
/// event already claimed it. Records persist even when the event turned
/// out to have no plan effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRecord {
    pub event_id: EventId,
    pub event_type: String,
    /// The workspace the event resolved to, when it resolved to one.
    pub workspace_id: Option<WorkspaceId>,
    pub received_at: Timestamp,
}

impl LedgerRecord {
    /// Builds a ledger record for a verified event before dispatch.
    ///
    /// The workspace is unknown at claim time; it is filled in by the
    /// handler once the event has been resolved.
    pub fn claim(event: &BillingEvent) -> Self {
        Self {
            event_id: event.id.clone(),
            event_type: event.event_type.clone(),
            workspace_id: None,
            received_at: Timestamp::now(),
        }
    }
}
