//! StartCheckoutHandler - starts a hosted checkout for an upgrade.

use std::sync::Arc;

use crate::domain::foundation::WorkspaceId;
use crate::ports::{CheckoutRequest, CheckoutSession, PaymentError, PaymentProvider};

/// Command to start a checkout session.
#[derive(Debug, Clone)]
pub struct StartCheckoutCommand {
    pub workspace_id: WorkspaceId,
    /// Email of the admin starting the upgrade.
    pub email: String,
    pub success_url: String,
    pub cancel_url: String,
}

/// Handler that creates a hosted checkout session.
///
/// The workspace id travels in the session's metadata so the completed
/// checkout event can be resolved back to the tenant.
pub struct StartCheckoutHandler {
    payment_provider: Arc<dyn PaymentProvider>,
}

impl StartCheckoutHandler {
    pub fn new(payment_provider: Arc<dyn PaymentProvider>) -> Self {
        Self { payment_provider }
    }

    pub async fn handle(&self, cmd: StartCheckoutCommand) -> Result<CheckoutSession, PaymentError> {
        let session = self
            .payment_provider
            .create_checkout_session(CheckoutRequest {
                workspace_id: cmd.workspace_id,
                email: cmd.email,
                success_url: cmd.success_url,
                cancel_url: cmd.cancel_url,
            })
            .await?;

        tracing::info!(workspace_id = %cmd.workspace_id, session_id = %session.id, "checkout started");

        Ok(session)
    }
}
