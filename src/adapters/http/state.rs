//! Shared application state for the HTTP surface.

use std::sync::Arc;

use crate::application::handlers::billing::{
    ConfirmCheckoutHandler, IngestBillingEventHandler, StartCheckoutHandler,
};
use crate::application::handlers::tenancy::{
    AddMemberHandler, CreateWorkspaceHandler, RemoveMemberHandler, ResolveAccessHandler,
    UpdateMemberRoleHandler,
};
use crate::domain::tenancy::Role;
use crate::ports::{
    EventLedger, MembershipStore, PaymentProvider, SessionValidator, WorkspaceRecall,
    WorkspaceStore,
};

use super::middleware::WorkspaceGuard;

/// Shared application state containing all port implementations.
///
/// Cloned per request; every field is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub session_validator: Arc<dyn SessionValidator>,
    pub workspace_store: Arc<dyn WorkspaceStore>,
    pub membership_store: Arc<dyn MembershipStore>,
    pub event_ledger: Arc<dyn EventLedger>,
    pub payment_provider: Arc<dyn PaymentProvider>,
    pub workspace_recall: Arc<dyn WorkspaceRecall>,
}

impl AppState {
    /// Create handlers on demand from the shared state.
    pub fn create_workspace_handler(&self) -> CreateWorkspaceHandler {
        CreateWorkspaceHandler::new(self.workspace_store.clone())
    }

    pub fn add_member_handler(&self) -> AddMemberHandler {
        AddMemberHandler::new(self.workspace_store.clone(), self.membership_store.clone())
    }

    pub fn remove_member_handler(&self) -> RemoveMemberHandler {
        RemoveMemberHandler::new(self.membership_store.clone())
    }

    pub fn update_member_role_handler(&self) -> UpdateMemberRoleHandler {
        UpdateMemberRoleHandler::new(self.membership_store.clone())
    }

    pub fn resolve_access_handler(&self) -> ResolveAccessHandler {
        ResolveAccessHandler::new(
            self.session_validator.clone(),
            self.workspace_store.clone(),
            self.membership_store.clone(),
            self.workspace_recall.clone(),
        )
    }

    pub fn start_checkout_handler(&self) -> StartCheckoutHandler {
        StartCheckoutHandler::new(self.payment_provider.clone())
    }

    pub fn confirm_checkout_handler(&self) -> ConfirmCheckoutHandler {
        ConfirmCheckoutHandler::new(self.payment_provider.clone(), self.workspace_store.clone())
    }

    pub fn ingest_billing_event_handler(&self) -> IngestBillingEventHandler {
        IngestBillingEventHandler::new(
            self.payment_provider.clone(),
            self.event_ledger.clone(),
            self.workspace_store.clone(),
        )
    }

    /// Guard state for workspace-scoped route groups.
    pub fn workspace_guard(&self, minimum_role: Role) -> WorkspaceGuard {
        WorkspaceGuard::new(Arc::new(self.resolve_access_handler()), minimum_role)
    }
}
