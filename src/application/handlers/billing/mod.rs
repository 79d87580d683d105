//! Billing command handlers.

mod confirm_checkout;
mod ingest_billing_event;
mod start_checkout;

pub use confirm_checkout::ConfirmCheckoutHandler;
pub use ingest_billing_event::{
    IngestBillingEventCommand, IngestBillingEventHandler, IngestOutcome,
};
pub use start_checkout::{StartCheckoutCommand, StartCheckoutHandler};
