//! Payment provider port for external payment processing.
//!
//! Defines the contract for payment gateway integrations. Plan changes
//! never happen here; the provider only starts checkouts, confirms
//! finished ones, and verifies inbound event deliveries.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::billing::BillingEvent;
use crate::domain::foundation::WorkspaceId;

/// Port for payment provider integrations.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Creates a hosted checkout session for a workspace upgrade.
    ///
    /// Returns a URL for the admin to complete payment.
    async fn create_checkout_session(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError>;

    /// Confirms a finished checkout by its session token.
    ///
    /// Called from the post-checkout return page. The confirmation is a
    /// UX convenience; the authoritative plan change arrives via the
    /// event stream.
    async fn confirm_checkout(&self, session_token: &str)
        -> Result<CheckoutConfirmation, PaymentError>;

    /// Verifies an event delivery's signature and parses the event.
    async fn verify_event(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<BillingEvent, PaymentError>;
}

/// Request to create a checkout session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    /// Workspace being upgraded (stored as session metadata).
    pub workspace_id: WorkspaceId,

    /// Email of the admin starting the checkout, for pre-fill.
    pub email: String,

    /// URL to redirect to after a successful checkout.
    pub success_url: String,

    /// URL to redirect to after an abandoned checkout.
    pub cancel_url: String,
}

/// Checkout session returned by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider's session id.
    pub id: String,

    /// URL for the customer to complete checkout.
    pub url: String,

    /// When the session expires (Unix timestamp).
    pub expires_at: i64,
}

/// Result of confirming a checkout session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutConfirmation {
    /// Whether the provider reports the session as paid.
    pub verified: bool,

    /// Workspace id carried in the session's metadata, if present.
    pub workspace_ref: Option<String>,

    /// Provider's customer id, if one was created.
    pub customer_ref: Option<String>,
}

/// Errors from payment provider operations.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The provider rejected the request.
    #[error("Payment provider rejected request: {0}")]
    Rejected(String),

    /// Signature verification of an event delivery failed.
    #[error("Event verification failed: {0}")]
    VerificationFailed(String),

    /// The provider could not be reached.
    #[error("Payment provider unavailable: {0}")]
    Unavailable(String),
}

impl PaymentError {
    /// Creates an unavailable error with a message.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}
