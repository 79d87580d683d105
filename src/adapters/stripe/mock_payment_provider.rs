//! Mock payment provider for testing.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::billing::BillingEvent;
use crate::ports::{
    CheckoutConfirmation, CheckoutRequest, CheckoutSession, PaymentError, PaymentProvider,
};

/// Canned payment provider.
///
/// Verifies events by comparing the signature header against an
/// optional expected value and parsing the payload as JSON, skipping
/// real HMAC work. Checkout confirmations come from a preloaded map.
#[derive(Debug, Default)]
pub struct MockPaymentProvider {
    /// When set, only this exact signature header verifies.
    expected_signature: Option<String>,
    confirmations: RwLock<HashMap<String, CheckoutConfirmation>>,
}

impl MockPaymentProvider {
    /// Builds a provider that accepts any signature.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a provider that accepts only the given signature header.
    pub fn accepting_signature(signature: impl Into<String>) -> Self {
        Self {
            expected_signature: Some(signature.into()),
            confirmations: RwLock::new(HashMap::new()),
        }
    }

    /// Preloads a checkout confirmation for a session token.
    pub fn with_confirmation(
        self,
        session_token: impl Into<String>,
        confirmation: CheckoutConfirmation,
    ) -> Self {
        self.confirmations
            .write()
            .unwrap()
            .insert(session_token.into(), confirmation);
        self
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_checkout_session(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        Ok(CheckoutSession {
            id: format!("cs_mock_{}", request.workspace_id),
            url: format!("https://checkout.example.test/cs_mock_{}", request.workspace_id),
            expires_at: chrono::Utc::now().timestamp() + 1800,
        })
    }

    async fn confirm_checkout(
        &self,
        session_token: &str,
    ) -> Result<CheckoutConfirmation, PaymentError> {
        Ok(self
            .confirmations
            .read()
            .unwrap()
            .get(session_token)
            .cloned()
            .unwrap_or(CheckoutConfirmation {
                verified: false,
                workspace_ref: None,
                customer_ref: None,
            }))
    }

    async fn verify_event(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<BillingEvent, PaymentError> {
        if let Some(expected) = &self.expected_signature {
            if signature != expected {
                return Err(PaymentError::VerificationFailed(
                    "signature mismatch".to_string(),
                ));
            }
        }

        serde_json::from_slice(payload)
            .map_err(|e| PaymentError::VerificationFailed(format!("invalid payload: {}", e)))
    }
}
