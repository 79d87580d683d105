//! PostgreSQL adapter implementations.
//!
//! sqlx-backed stores. The tenancy invariants that must hold under
//! concurrency are enforced by the database itself: uniqueness
//! constraints decide membership and ledger conflicts, and the owner
//! checks are folded into the mutating statements.

mod event_ledger;
mod membership_store;
mod workspace_store;

pub use event_ledger::PostgresEventLedger;
pub use membership_store::PostgresMembershipStore;
pub use workspace_store::PostgresWorkspaceStore;
