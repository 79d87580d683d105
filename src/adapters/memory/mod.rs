//! In-memory adapter implementations.
//!
//! Back the ports with plain maps behind async locks. Used by the test
//! suite and by local development without external services. Semantics
//! match the postgres adapters: uniqueness conflicts, conditional owner
//! mutations, and conflict-tolerant ledger inserts all behave the same.

mod event_ledger;
mod membership_store;
mod workspace_recall;
mod workspace_store;

pub use event_ledger::InMemoryEventLedger;
pub use membership_store::InMemoryMembershipStore;
pub use workspace_recall::InMemoryWorkspaceRecall;
pub use workspace_store::InMemoryWorkspaceStore;
