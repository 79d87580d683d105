//! IngestBillingEventHandler - processes inbound billing event deliveries.

use std::sync::Arc;

use crate::domain::billing::{BillingError, BillingEvent, BillingEventType, LedgerRecord};
use crate::domain::tenancy::Workspace;
use crate::ports::{EventLedger, InsertOutcome, PaymentError, PaymentProvider, WorkspaceStore};

/// Command to ingest a billing event delivery.
#[derive(Debug, Clone)]
pub struct IngestBillingEventCommand {
    /// Raw request body, exactly as received.
    pub payload: Vec<u8>,
    /// Signature header from the delivery.
    pub signature: String,
}

/// Outcome of ingesting a billing event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// The event was claimed and its plan effect applied.
    Applied,
    /// Another delivery of the same event already claimed it.
    AlreadyProcessed,
    /// The event was claimed but had no plan effect (unmapped type,
    /// unresolvable workspace, or a dispatch failure that was logged).
    Unmapped,
}

/// Handler for inbound billing events.
///
/// Processing order is fixed: verify the signature, claim the event id
/// in the ledger, then dispatch. The ledger insert is the only
/// serialization point; of N concurrent deliveries of one event,
/// exactly one sees `Inserted` and dispatches, the rest acknowledge.
///
/// Once an event is claimed its ledger record is never rolled back, so
/// a delivery is processed at most once even when dispatch fails.
pub struct IngestBillingEventHandler {
    payment_provider: Arc<dyn PaymentProvider>,
    event_ledger: Arc<dyn EventLedger>,
    workspace_store: Arc<dyn WorkspaceStore>,
}

impl IngestBillingEventHandler {
    pub fn new(
        payment_provider: Arc<dyn PaymentProvider>,
        event_ledger: Arc<dyn EventLedger>,
        workspace_store: Arc<dyn WorkspaceStore>,
    ) -> Self {
        Self {
            payment_provider,
            event_ledger,
            workspace_store,
        }
    }

    pub async fn handle(
        &self,
        cmd: IngestBillingEventCommand,
    ) -> Result<IngestOutcome, BillingError> {
        // 1. Verify signature and parse
        let event = self
            .payment_provider
            .verify_event(&cmd.payload, &cmd.signature)
            .await
            .map_err(|err| match err {
                PaymentError::VerificationFailed(_) => BillingError::InvalidSignature,
                other => BillingError::Provider(other.to_string()),
            })?;

        // 2. Claim the event id
        let record = LedgerRecord::claim(&event);
        match self.event_ledger.insert(&record).await? {
            InsertOutcome::Inserted => {}
            InsertOutcome::AlreadyExists => {
                tracing::debug!(event_id = %event.id, "duplicate delivery acknowledged");
                return Ok(IngestOutcome::AlreadyProcessed);
            }
        }

        // 3. Dispatch
        Ok(self.dispatch(&event).await)
    }

    /// Applies the event's plan effect.
    ///
    /// Failures past the claim are logged and acknowledged rather than
    /// bounced: the provider would redeliver, and a redelivery would hit
    /// the existing ledger record and be skipped anyway.
    async fn dispatch(&self, event: &BillingEvent) -> IngestOutcome {
        let result = match event.parsed_type() {
            BillingEventType::CheckoutCompleted => self.apply_checkout_completed(event).await,
            BillingEventType::SubscriptionDeleted | BillingEventType::PaymentFailed => {
                self.apply_downgrade(event).await
            }
            BillingEventType::Unknown(event_type) => {
                tracing::debug!(event_id = %event.id, event_type, "unmapped event type acknowledged");
                return IngestOutcome::Unmapped;
            }
        };

        match result {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(event_id = %event.id, error = %err, "event dispatch failed");
                IngestOutcome::Unmapped
            }
        }
    }

    async fn apply_checkout_completed(
        &self,
        event: &BillingEvent,
    ) -> Result<IngestOutcome, BillingError> {
        let object = &event.data.object;
        let customer_ref = object
            .get("customer")
            .and_then(|v| v.as_str())
            .map(str::to_string);

        let Some(mut workspace) = self.resolve_workspace(event, customer_ref.as_deref()).await?
        else {
            return Ok(IngestOutcome::Unmapped);
        };

        workspace.upgrade_to_pro(customer_ref);
        self.persist(event, &workspace).await?;

        tracing::info!(event_id = %event.id, workspace_id = %workspace.id, "workspace upgraded");
        Ok(IngestOutcome::Applied)
    }

    async fn apply_downgrade(&self, event: &BillingEvent) -> Result<IngestOutcome, BillingError> {
        let customer_ref = event
            .data
            .object
            .get("customer")
            .and_then(|v| v.as_str())
            .map(str::to_string);

        let Some(mut workspace) = self.resolve_workspace(event, customer_ref.as_deref()).await?
        else {
            return Ok(IngestOutcome::Unmapped);
        };

        workspace.downgrade_to_free();
        self.persist(event, &workspace).await?;

        tracing::info!(event_id = %event.id, workspace_id = %workspace.id, "workspace downgraded");
        Ok(IngestOutcome::Applied)
    }

    /// Resolves the event to a workspace.
    ///
    /// Checkout events carry the workspace id in session metadata; the
    /// rest only name the provider's customer. Try metadata first, then
    /// the customer reference.
    async fn resolve_workspace(
        &self,
        event: &BillingEvent,
        customer_ref: Option<&str>,
    ) -> Result<Option<Workspace>, BillingError> {
        if let Some(id_str) = event
            .data
            .object
            .get("metadata")
            .and_then(|m| m.get("workspace_id"))
            .and_then(|v| v.as_str())
        {
            let Ok(workspace_id) = id_str.parse() else {
                tracing::warn!(event_id = %event.id, workspace_ref = id_str, "malformed workspace id in metadata");
                return Ok(None);
            };
            if let Some(workspace) = self
                .workspace_store
                .find_by_id(&workspace_id)
                .await
                .map_err(|e| BillingError::Database(e.to_string()))?
            {
                return Ok(Some(workspace));
            }
        }

        if let Some(customer_ref) = customer_ref {
            let found = self
                .workspace_store
                .find_by_customer_ref(customer_ref)
                .await
                .map_err(|e| BillingError::Database(e.to_string()))?;
            if found.is_some() {
                return Ok(found);
            }
        }

        tracing::warn!(event_id = %event.id, "event did not resolve to a workspace");
        Ok(None)
    }

    async fn persist(&self, event: &BillingEvent, workspace: &Workspace) -> Result<(), BillingError> {
        self.workspace_store
            .update(workspace)
            .await
            .map_err(|e| BillingError::Database(e.to_string()))?;
        self.event_ledger.mark_resolved(&event.id, &workspace.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryEventLedger, InMemoryWorkspaceStore};
    use crate::adapters::stripe::MockPaymentProvider;
    use crate::domain::foundation::{EventId, UserId, WorkspaceId};
    use crate::domain::tenancy::{Membership, Plan};

    const SIGNATURE: &str = "t=0,v1=valid";

    struct Fixture {
        handler: IngestBillingEventHandler,
        workspaces: Arc<InMemoryWorkspaceStore>,
        ledger: Arc<InMemoryEventLedger>,
        workspace_id: WorkspaceId,
    }

    async fn fixture() -> Fixture {
        let workspaces = Arc::new(InMemoryWorkspaceStore::new());
        let ledger = Arc::new(InMemoryEventLedger::new());
        let provider = Arc::new(MockPaymentProvider::accepting_signature(SIGNATURE));

        let workspace = Workspace::create(WorkspaceId::new(), "Acme");
        let workspace_id = workspace.id;
        let owner = Membership::owner(UserId::new("owner").unwrap(), workspace_id);
        workspaces.create_with_owner(&workspace, &owner).await.unwrap();

        Fixture {
            handler: IngestBillingEventHandler::new(provider, ledger.clone(), workspaces.clone()),
            workspaces,
            ledger,
            workspace_id,
        }
    }

    fn checkout_event(event_id: &str, workspace_id: WorkspaceId) -> Vec<u8> {
        serde_json::json!({
            "id": event_id,
            "type": "checkout.session.completed",
            "created": 1704067200,
            "data": {
                "object": {
                    "customer": "cus_42",
                    "metadata": { "workspace_id": workspace_id.to_string() }
                }
            },
            "livemode": false
        })
        .to_string()
        .into_bytes()
    }

    fn downgrade_event(event_id: &str, event_type: &str, customer: &str) -> Vec<u8> {
        serde_json::json!({
            "id": event_id,
            "type": event_type,
            "created": 1704067200,
            "data": { "object": { "customer": customer } },
            "livemode": false
        })
        .to_string()
        .into_bytes()
    }

    fn command(payload: Vec<u8>) -> IngestBillingEventCommand {
        IngestBillingEventCommand {
            payload,
            signature: SIGNATURE.to_string(),
        }
    }

    #[tokio::test]
    async fn checkout_completed_upgrades_workspace() {
        let fx = fixture().await;

        let outcome = fx
            .handler
            .handle(command(checkout_event("evt_1", fx.workspace_id)))
            .await
            .unwrap();

        assert_eq!(outcome, IngestOutcome::Applied);

        let workspace = fx.workspaces.find_by_id(&fx.workspace_id).await.unwrap().unwrap();
        assert_eq!(workspace.plan, Plan::Pro);
        assert_eq!(workspace.billing_customer_ref.as_deref(), Some("cus_42"));

        let record = fx.ledger.find(&EventId::new("evt_1")).await.unwrap().unwrap();
        assert_eq!(record.workspace_id, Some(fx.workspace_id));
    }

    #[tokio::test]
    async fn duplicate_delivery_is_acknowledged_without_reapplying() {
        let fx = fixture().await;
        let payload = checkout_event("evt_1", fx.workspace_id);

        let first = fx.handler.handle(command(payload.clone())).await.unwrap();
        let second = fx.handler.handle(command(payload)).await.unwrap();

        assert_eq!(first, IngestOutcome::Applied);
        assert_eq!(second, IngestOutcome::AlreadyProcessed);
    }

    #[tokio::test]
    async fn payment_failed_downgrades_by_customer_ref() {
        let fx = fixture().await;
        fx.handler
            .handle(command(checkout_event("evt_1", fx.workspace_id)))
            .await
            .unwrap();

        let outcome = fx
            .handler
            .handle(command(downgrade_event("evt_2", "invoice.payment_failed", "cus_42")))
            .await
            .unwrap();

        assert_eq!(outcome, IngestOutcome::Applied);
        let workspace = fx.workspaces.find_by_id(&fx.workspace_id).await.unwrap().unwrap();
        assert_eq!(workspace.plan, Plan::Free);
        // Customer ref survives the downgrade.
        assert_eq!(workspace.billing_customer_ref.as_deref(), Some("cus_42"));
    }

    #[tokio::test]
    async fn subscription_deleted_downgrades() {
        let fx = fixture().await;
        fx.handler
            .handle(command(checkout_event("evt_1", fx.workspace_id)))
            .await
            .unwrap();

        let outcome = fx
            .handler
            .handle(command(downgrade_event(
                "evt_2",
                "customer.subscription.deleted",
                "cus_42",
            )))
            .await
            .unwrap();

        assert_eq!(outcome, IngestOutcome::Applied);
        let workspace = fx.workspaces.find_by_id(&fx.workspace_id).await.unwrap().unwrap();
        assert_eq!(workspace.plan, Plan::Free);
    }

    #[tokio::test]
    async fn unknown_event_type_is_acknowledged_and_ledgered() {
        let fx = fixture().await;
        let payload = downgrade_event("evt_9", "customer.subscription.paused", "cus_42");

        let outcome = fx.handler.handle(command(payload)).await.unwrap();

        assert_eq!(outcome, IngestOutcome::Unmapped);
        // The ledger entry exists so a redelivery is still deduplicated.
        assert!(fx.ledger.find(&EventId::new("evt_9")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn unresolvable_event_is_acknowledged_and_ledgered() {
        let fx = fixture().await;
        let payload = downgrade_event("evt_3", "invoice.payment_failed", "cus_unknown");

        let outcome = fx.handler.handle(command(payload)).await.unwrap();

        assert_eq!(outcome, IngestOutcome::Unmapped);
        assert!(fx.ledger.find(&EventId::new("evt_3")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn bad_signature_is_rejected_before_the_ledger() {
        let fx = fixture().await;
        let cmd = IngestBillingEventCommand {
            payload: checkout_event("evt_1", fx.workspace_id),
            signature: "t=0,v1=forged".to_string(),
        };

        let result = fx.handler.handle(cmd).await;

        assert!(matches!(result, Err(BillingError::InvalidSignature)));
        assert!(fx.ledger.find(&EventId::new("evt_1")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn upgrade_is_idempotent_across_distinct_events() {
        let fx = fixture().await;

        fx.handler
            .handle(command(checkout_event("evt_1", fx.workspace_id)))
            .await
            .unwrap();
        let outcome = fx
            .handler
            .handle(command(checkout_event("evt_2", fx.workspace_id)))
            .await
            .unwrap();

        // A second checkout event is a distinct event and is applied,
        // but the aggregate transition is a no-op.
        assert_eq!(outcome, IngestOutcome::Applied);
        let workspace = fx.workspaces.find_by_id(&fx.workspace_id).await.unwrap().unwrap();
        assert_eq!(workspace.plan, Plan::Pro);
    }

    #[tokio::test]
    async fn concurrent_duplicate_deliveries_apply_once() {
        let fx = fixture().await;
        let handler = Arc::new(fx.handler);

        let mut tasks = Vec::new();
        for _ in 0..8 {
            let handler = handler.clone();
            let payload = checkout_event("evt_dup", fx.workspace_id);
            tasks.push(tokio::spawn(async move {
                handler.handle(command(payload)).await.unwrap()
            }));
        }

        let mut applied = 0;
        for task in tasks {
            if task.await.unwrap() == IngestOutcome::Applied {
                applied += 1;
            }
        }

        assert_eq!(applied, 1);
        let workspace = fx.workspaces.find_by_id(&fx.workspace_id).await.unwrap().unwrap();
        assert_eq!(workspace.plan, Plan::Pro);
    }
}
