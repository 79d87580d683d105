//! ConfirmCheckoutHandler - post-checkout return page confirmation.

use std::sync::Arc;

use crate::domain::foundation::WorkspaceId;
use crate::domain::tenancy::PlanTransition;
use crate::ports::{PaymentProvider, WorkspaceStore};

/// Handler that confirms a checkout session after the hosted redirect.
///
/// This path is a UX convenience so the workspace shows as upgraded the
/// moment the admin lands back on the app; the authoritative transition
/// arrives via the event stream and is idempotent against this one.
///
/// Every failure maps to `None`: the return page simply shows the
/// pending state and the event stream catches up. A replayed token
/// also yields `None`, because the workspace is already upgraded and
/// there is no transition left to attribute to it.
pub struct ConfirmCheckoutHandler {
    payment_provider: Arc<dyn PaymentProvider>,
    workspace_store: Arc<dyn WorkspaceStore>,
}

impl ConfirmCheckoutHandler {
    pub fn new(
        payment_provider: Arc<dyn PaymentProvider>,
        workspace_store: Arc<dyn WorkspaceStore>,
    ) -> Self {
        Self {
            payment_provider,
            workspace_store,
        }
    }

    pub async fn handle(&self, session_token: &str) -> Option<WorkspaceId> {
        let confirmation = match self.payment_provider.confirm_checkout(session_token).await {
            Ok(confirmation) => confirmation,
            Err(err) => {
                tracing::warn!(error = %err, "checkout confirmation failed");
                return None;
            }
        };

        if !confirmation.verified {
            tracing::debug!("checkout session not yet paid");
            return None;
        }

        let workspace_id: WorkspaceId = confirmation.workspace_ref.as_deref()?.parse().ok()?;

        let mut workspace = match self.workspace_store.find_by_id(&workspace_id).await {
            Ok(Some(workspace)) => workspace,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!(error = %err, "workspace lookup failed during confirmation");
                return None;
            }
        };

        match workspace.upgrade_to_pro(confirmation.customer_ref) {
            PlanTransition::Applied => {
                if let Err(err) = self.workspace_store.update(&workspace).await {
                    tracing::warn!(error = %err, "failed to persist confirmed upgrade");
                    return None;
                }
                tracing::info!(workspace_id = %workspace_id, "checkout confirmed");
                Some(workspace_id)
            }
            PlanTransition::Noop => {
                tracing::debug!(workspace_id = %workspace_id, "checkout already applied");
                None
            }
        }
    }
}
