//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` port against the Stripe API:
//! hosted checkout sessions, post-redirect confirmation, and event
//! signature verification.
//!
//! # Security
//!
//! - Event signatures verified with HMAC-SHA256 and constant-time
//!   comparison, with a 5-minute replay window
//! - Secrets handled via `secrecy::SecretString`

use std::collections::HashMap;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::billing::{BillingEvent, SignatureVerifier};
use crate::ports::{
    CheckoutConfirmation, CheckoutRequest, CheckoutSession, PaymentError, PaymentProvider,
};

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// Webhook signing secret (whsec_...).
    webhook_secret: SecretString,

    /// Price id for the paid plan.
    price_id: String,

    /// Base URL for the Stripe API.
    api_base_url: String,
}

impl StripeConfig {
    pub fn new(
        api_key: impl Into<String>,
        webhook_secret: impl Into<String>,
        price_id: impl Into<String>,
    ) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            webhook_secret: SecretString::new(webhook_secret.into()),
            price_id: price_id.into(),
            api_base_url: "https://api.stripe.com".to_string(),
        }
    }

    /// Sets a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

/// Stripe implementation of `PaymentProvider`.
pub struct StripePaymentAdapter {
    config: StripeConfig,
    http_client: reqwest::Client,
    verifier: SignatureVerifier,
}

impl StripePaymentAdapter {
    pub fn new(config: StripeConfig) -> Self {
        let verifier = SignatureVerifier::new(config.webhook_secret.expose_secret());
        Self {
            config,
            http_client: reqwest::Client::new(),
            verifier,
        }
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        context: &str,
    ) -> Result<T, PaymentError> {
        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(error = %error_text, context, "Stripe API call failed");
            return Err(PaymentError::Rejected(format!(
                "Stripe API error: {}",
                error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| PaymentError::Rejected(format!("Failed to parse Stripe response: {}", e)))
    }
}

#[async_trait]
impl PaymentProvider for StripePaymentAdapter {
    async fn create_checkout_session(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);

        let params = vec![
            ("mode", "subscription".to_string()),
            ("line_items[0][price]", self.config.price_id.clone()),
            ("line_items[0][quantity]", "1".to_string()),
            ("customer_email", request.email),
            ("success_url", request.success_url),
            ("cancel_url", request.cancel_url),
            // The workspace id rides along so the completed event can
            // be resolved back to the tenant.
            ("metadata[workspace_id]", request.workspace_id.to_string()),
        ];

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .form(&params)
            .send()
            .await
            .map_err(|e| PaymentError::unavailable(e.to_string()))?;

        let session: StripeCheckoutSession =
            Self::read_json(response, "create_checkout_session").await?;

        Ok(CheckoutSession {
            id: session.id,
            url: session.url.unwrap_or_default(),
            expires_at: session.expires_at,
        })
    }

    async fn confirm_checkout(
        &self,
        session_token: &str,
    ) -> Result<CheckoutConfirmation, PaymentError> {
        let url = format!(
            "{}/v1/checkout/sessions/{}",
            self.config.api_base_url, session_token
        );

        let response = self
            .http_client
            .get(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .send()
            .await
            .map_err(|e| PaymentError::unavailable(e.to_string()))?;

        let session: StripeCheckoutSession = Self::read_json(response, "confirm_checkout").await?;

        Ok(CheckoutConfirmation {
            verified: session.payment_status.as_deref() == Some("paid"),
            workspace_ref: session.metadata.get("workspace_id").cloned(),
            customer_ref: session.customer,
        })
    }

    async fn verify_event(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<BillingEvent, PaymentError> {
        self.verifier
            .verify_and_parse(payload, signature)
            .map_err(|e| PaymentError::VerificationFailed(e.to_string()))
    }
}

/// Checkout session as returned by the Stripe API.
#[derive(Debug, Deserialize)]
struct StripeCheckoutSession {
    id: String,

    /// Hosted checkout URL. Absent once the session completes.
    #[serde(default)]
    url: Option<String>,

    #[serde(default)]
    expires_at: i64,

    /// "paid", "unpaid", or "no_payment_required".
    #[serde(default)]
    payment_status: Option<String>,

    #[serde(default)]
    customer: Option<String>,

    #[serde(default)]
    metadata: HashMap<String, String>,
}
