//! Stripe payment provider adapters.
//!
//! - `stripe_adapter` - production `PaymentProvider` over the Stripe API
//! - `mock_payment_provider` - canned implementation for tests

mod mock_payment_provider;
mod stripe_adapter;

pub use mock_payment_provider::MockPaymentProvider;
pub use stripe_adapter::{StripeConfig, StripePaymentAdapter};
