//! Billing domain module.
//!
//! Models the external payment provider's event stream: typed events,
//! signature verification for inbound deliveries, and the ledger record
//! that makes processing idempotent. Plan state itself lives on the
//! workspace aggregate; this module only decides what an event means.

mod errors;
mod event;
mod ledger;
mod signature;

pub use errors::BillingError;
pub use event::{BillingEvent, BillingEventData, BillingEventType};
pub use ledger::LedgerRecord;
pub use signature::{SignatureHeader, SignatureVerifier};

#[cfg(test)]
pub(crate) use signature::compute_test_signature;
