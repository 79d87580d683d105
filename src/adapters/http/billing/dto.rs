//! HTTP DTOs for billing endpoints.

use serde::{Deserialize, Serialize};

use crate::ports::CheckoutSession;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to start a checkout flow for the workspace.
#[derive(Debug, Clone, Deserialize)]
pub struct StartCheckoutRequest {
    /// URL to redirect after successful checkout.
    pub success_url: String,
    /// URL to redirect after cancelled checkout.
    pub cancel_url: String,
}

/// Request to confirm a completed checkout by its opaque token.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmCheckoutRequest {
    pub session_token: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// A created checkout session the client should redirect to.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutResponse {
    pub session_id: String,
    pub checkout_url: String,
    pub expires_at: i64,
}

impl From<CheckoutSession> for CheckoutResponse {
    fn from(session: CheckoutSession) -> Self {
        Self {
            session_id: session.id,
            checkout_url: session.url,
            expires_at: session.expires_at,
        }
    }
}

/// Outcome of a checkout confirmation attempt.
///
/// `confirmed: false` covers every failure mode identically; the page
/// shows a pending state and the event stream catches up.
#[derive(Debug, Clone, Serialize)]
pub struct ConfirmCheckoutResponse {
    pub confirmed: bool,
    pub workspace_id: Option<String>,
}

/// Acknowledgement body for the webhook endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookAckResponse {
    pub status: &'static str,
}
