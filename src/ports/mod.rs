//! Ports - interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `WorkspaceStore` - workspace aggregate persistence
//! - `MembershipStore` - membership persistence with the owner rules
//! - `EventLedger` - processed billing event records (idempotency)
//!
//! ## Service Ports
//!
//! - `SessionValidator` - token validation against the identity provider
//! - `PaymentProvider` - checkout and event verification
//! - `WorkspaceRecall` - last-used workspace hints (UI convenience only)

mod event_ledger;
mod membership_store;
mod payment_provider;
mod session_validator;
mod workspace_recall;
mod workspace_store;

pub use event_ledger::{EventLedger, InsertOutcome};
pub use membership_store::MembershipStore;
pub use payment_provider::{
    CheckoutConfirmation, CheckoutRequest, CheckoutSession, PaymentError, PaymentProvider,
};
pub use session_validator::SessionValidator;
pub use workspace_recall::WorkspaceRecall;
pub use workspace_store::WorkspaceStore;
