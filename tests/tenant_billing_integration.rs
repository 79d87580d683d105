//! End-to-end scenarios over the in-memory adapters: onboarding,
//! membership management with owner protection, checkout confirmation,
//! and idempotent billing event ingestion.

use std::sync::Arc;

use workroom::adapters::auth::MockSessionValidator;
use workroom::adapters::memory::{
    InMemoryEventLedger, InMemoryWorkspaceRecall, InMemoryWorkspaceStore,
};
use workroom::adapters::stripe::MockPaymentProvider;
use workroom::application::handlers::billing::{
    ConfirmCheckoutHandler, IngestBillingEventCommand, IngestBillingEventHandler, IngestOutcome,
};
use workroom::application::handlers::tenancy::{
    AddMemberCommand, AddMemberHandler, CreateWorkspaceCommand, CreateWorkspaceHandler,
    RemoveMemberCommand, RemoveMemberHandler, ResolveAccessCommand, ResolveAccessHandler,
    UpdateMemberRoleCommand, UpdateMemberRoleHandler,
};
use workroom::domain::foundation::{UserId, WorkspaceId};
use workroom::domain::tenancy::{AccessDenied, Plan, Role, TenancyError};
use workroom::ports::{CheckoutConfirmation, MembershipStore, WorkspaceStore};

// ════════════════════════════════════════════════════════════════════════════════
// Fixture
// ════════════════════════════════════════════════════════════════════════════════

struct Fixture {
    workspace_store: Arc<InMemoryWorkspaceStore>,
    payment_provider: Arc<MockPaymentProvider>,
    event_ledger: Arc<InMemoryEventLedger>,
}

impl Fixture {
    fn new() -> Self {
        Self::with_provider(Arc::new(MockPaymentProvider::new()))
    }

    fn with_provider(payment_provider: Arc<MockPaymentProvider>) -> Self {
        Self {
            workspace_store: Arc::new(InMemoryWorkspaceStore::new()),
            payment_provider,
            event_ledger: Arc::new(InMemoryEventLedger::new()),
        }
    }

    async fn create_workspace(&self, owner: &str, name: &str) -> WorkspaceId {
        let handler = CreateWorkspaceHandler::new(self.workspace_store.clone());
        let workspace = handler
            .handle(CreateWorkspaceCommand {
                name: name.to_string(),
                owner_id: UserId::new(owner).unwrap(),
            })
            .await
            .unwrap();
        workspace.id
    }

    fn ingest_handler(&self) -> IngestBillingEventHandler {
        IngestBillingEventHandler::new(
            self.payment_provider.clone(),
            self.event_ledger.clone(),
            self.workspace_store.clone(),
        )
    }

    fn resolver(&self, token: &str, user: &str) -> ResolveAccessHandler {
        ResolveAccessHandler::new(
            Arc::new(MockSessionValidator::accepting(
                token,
                UserId::new(user).unwrap(),
            )),
            self.workspace_store.clone(),
            self.workspace_store.memberships(),
            Arc::new(InMemoryWorkspaceRecall::new()),
        )
    }

    async fn plan_of(&self, workspace_id: &WorkspaceId) -> Plan {
        self.workspace_store
            .find_by_id(workspace_id)
            .await
            .unwrap()
            .unwrap()
            .plan
    }
}

fn checkout_completed_event(event_id: &str, workspace_id: &WorkspaceId) -> Vec<u8> {
    format!(
        r#"{{"id":"{}","type":"checkout.session.completed","created":1700000000,
            "data":{{"object":{{"metadata":{{"workspace_id":"{}"}},"customer":"cus_w1"}}}}}}"#,
        event_id, workspace_id
    )
    .into_bytes()
}

fn payment_failed_event(event_id: &str, customer: &str) -> Vec<u8> {
    format!(
        r#"{{"id":"{}","type":"invoice.payment_failed","created":1700000000,
            "data":{{"object":{{"customer":"{}"}}}}}}"#,
        event_id, customer
    )
    .into_bytes()
}

// ════════════════════════════════════════════════════════════════════════════════
// Scenario 1: onboarding
// ════════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn new_workspace_starts_free_with_an_admin_owner() {
    let fixture = Fixture::new();
    let workspace_id = fixture.create_workspace("alice", "Acme").await;

    assert_eq!(fixture.plan_of(&workspace_id).await, Plan::Free);

    let owner = fixture
        .workspace_store
        .memberships()
        .find(&UserId::new("alice").unwrap(), &workspace_id)
        .await
        .unwrap()
        .unwrap();
    assert!(owner.is_owner);
    assert_eq!(owner.role, Role::Admin);
}

// ════════════════════════════════════════════════════════════════════════════════
// Scenario 2: membership management and owner protection
// ════════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn members_come_and_go_but_the_owner_stays() {
    let fixture = Fixture::new();
    let workspace_id = fixture.create_workspace("alice", "Acme").await;
    let memberships = fixture.workspace_store.memberships();

    let add = AddMemberHandler::new(fixture.workspace_store.clone(), memberships.clone());
    let bob = add
        .handle(AddMemberCommand {
            workspace_id,
            user_id: UserId::new("b@x.com").unwrap(),
            role: Role::Member,
        })
        .await
        .unwrap();
    assert!(!bob.is_owner);

    let remove = RemoveMemberHandler::new(memberships.clone());
    remove
        .handle(RemoveMemberCommand {
            workspace_id,
            user_id: UserId::new("b@x.com").unwrap(),
        })
        .await
        .unwrap();

    let owner_removal = remove
        .handle(RemoveMemberCommand {
            workspace_id,
            user_id: UserId::new("alice").unwrap(),
        })
        .await;
    assert!(matches!(owner_removal, Err(TenancyError::CannotRemoveOwner)));

    let owner_demotion = UpdateMemberRoleHandler::new(memberships)
        .handle(UpdateMemberRoleCommand {
            workspace_id,
            user_id: UserId::new("alice").unwrap(),
            role: Role::Member,
        })
        .await;
    assert!(matches!(
        owner_demotion,
        Err(TenancyError::CannotChangeOwnerRole)
    ));
}

#[tokio::test]
async fn adding_the_same_member_twice_is_rejected() {
    let fixture = Fixture::new();
    let workspace_id = fixture.create_workspace("alice", "Acme").await;
    let add = AddMemberHandler::new(
        fixture.workspace_store.clone(),
        fixture.workspace_store.memberships(),
    );

    let cmd = || AddMemberCommand {
        workspace_id,
        user_id: UserId::new("b@x.com").unwrap(),
        role: Role::Member,
    };

    add.handle(cmd()).await.unwrap();
    assert!(matches!(
        add.handle(cmd()).await,
        Err(TenancyError::AlreadyMember { .. })
    ));
}

// ════════════════════════════════════════════════════════════════════════════════
// Access resolution
// ════════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn non_members_and_unknown_workspaces_are_indistinguishable() {
    let fixture = Fixture::new();
    let workspace_id = fixture.create_workspace("alice", "Acme").await;
    let resolver = fixture.resolver("token-mallory", "mallory");

    let as_non_member = resolver
        .handle(ResolveAccessCommand {
            token: Some("token-mallory".to_string()),
            workspace_id,
            minimum_role: Role::Member,
        })
        .await;

    let as_probe = resolver
        .handle(ResolveAccessCommand {
            token: Some("token-mallory".to_string()),
            workspace_id: WorkspaceId::new(),
            minimum_role: Role::Member,
        })
        .await;

    assert_eq!(as_non_member.unwrap_err(), AccessDenied::NotFound);
    assert_eq!(as_probe.unwrap_err(), AccessDenied::NotFound);
}

#[tokio::test]
async fn insufficient_role_is_forbidden() {
    let fixture = Fixture::new();
    let workspace_id = fixture.create_workspace("alice", "Acme").await;
    AddMemberHandler::new(
        fixture.workspace_store.clone(),
        fixture.workspace_store.memberships(),
    )
    .handle(AddMemberCommand {
        workspace_id,
        user_id: UserId::new("bob").unwrap(),
        role: Role::Member,
    })
    .await
    .unwrap();

    let resolver = fixture.resolver("token-bob", "bob");
    let denied = resolver
        .handle(ResolveAccessCommand {
            token: Some("token-bob".to_string()),
            workspace_id,
            minimum_role: Role::Admin,
        })
        .await;

    assert_eq!(denied.unwrap_err(), AccessDenied::Forbidden);
}

// ════════════════════════════════════════════════════════════════════════════════
// Scenario 3: checkout confirmation
// ════════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn confirmed_checkout_upgrades_once_and_replay_returns_none() {
    let fixture = Fixture::new();
    let workspace_id = fixture.create_workspace("alice", "Acme").await;

    let provider = Arc::new(MockPaymentProvider::new().with_confirmation(
        "tok_abc",
        CheckoutConfirmation {
            verified: true,
            workspace_ref: Some(workspace_id.to_string()),
            customer_ref: Some("cus_w1".to_string()),
        },
    ));
    let handler = ConfirmCheckoutHandler::new(provider, fixture.workspace_store.clone());

    assert_eq!(handler.handle("tok_abc").await, Some(workspace_id));
    let workspace = fixture
        .workspace_store
        .find_by_id(&workspace_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(workspace.plan, Plan::Pro);
    assert!(workspace.upgraded_at.is_some());

    // The token has been spent: there is no transition left to report.
    assert_eq!(handler.handle("tok_abc").await, None);
    assert_eq!(fixture.plan_of(&workspace_id).await, Plan::Pro);
}

// ════════════════════════════════════════════════════════════════════════════════
// Scenario 4 and idempotence: event ingestion
// ════════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn checkout_event_upgrades_exactly_once() {
    let fixture = Fixture::new();
    let workspace_id = fixture.create_workspace("alice", "Acme").await;
    let handler = fixture.ingest_handler();

    let cmd = || IngestBillingEventCommand {
        payload: checkout_completed_event("evt_up", &workspace_id),
        signature: "t=0,v1=any".to_string(),
    };

    assert_eq!(handler.handle(cmd()).await.unwrap(), IngestOutcome::Applied);
    assert_eq!(fixture.plan_of(&workspace_id).await, Plan::Pro);

    assert_eq!(
        handler.handle(cmd()).await.unwrap(),
        IngestOutcome::AlreadyProcessed
    );
    assert_eq!(fixture.plan_of(&workspace_id).await, Plan::Pro);
}

#[tokio::test]
async fn payment_failure_downgrades_and_redelivery_is_deduplicated() {
    let fixture = Fixture::new();
    let workspace_id = fixture.create_workspace("alice", "Acme").await;
    let handler = fixture.ingest_handler();

    // Upgrade first so the customer ref is on record.
    handler
        .handle(IngestBillingEventCommand {
            payload: checkout_completed_event("evt_up", &workspace_id),
            signature: "t=0,v1=any".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(fixture.plan_of(&workspace_id).await, Plan::Pro);

    let failed = || IngestBillingEventCommand {
        payload: payment_failed_event("evt_1", "cus_w1"),
        signature: "t=0,v1=any".to_string(),
    };

    assert_eq!(
        handler.handle(failed()).await.unwrap(),
        IngestOutcome::Applied
    );
    assert_eq!(fixture.plan_of(&workspace_id).await, Plan::Free);

    assert_eq!(
        handler.handle(failed()).await.unwrap(),
        IngestOutcome::AlreadyProcessed
    );
    assert_eq!(fixture.plan_of(&workspace_id).await, Plan::Free);
}

#[tokio::test]
async fn downgrade_of_a_free_workspace_is_a_quiet_noop() {
    let fixture = Fixture::new();
    let workspace_id = fixture.create_workspace("alice", "Acme").await;

    // Attach a customer ref without upgrading so the event maps.
    let mut workspace = fixture
        .workspace_store
        .find_by_id(&workspace_id)
        .await
        .unwrap()
        .unwrap();
    workspace.billing_customer_ref = Some("cus_w1".to_string());
    fixture.workspace_store.update(&workspace).await.unwrap();

    let outcome = fixture
        .ingest_handler()
        .handle(IngestBillingEventCommand {
            payload: payment_failed_event("evt_noop", "cus_w1"),
            signature: "t=0,v1=any".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(outcome, IngestOutcome::Applied);
    assert_eq!(fixture.plan_of(&workspace_id).await, Plan::Free);
}

#[tokio::test]
async fn event_for_an_unknown_customer_is_acknowledged_and_kept() {
    let fixture = Fixture::new();
    fixture.create_workspace("alice", "Acme").await;

    let outcome = fixture
        .ingest_handler()
        .handle(IngestBillingEventCommand {
            payload: payment_failed_event("evt_ghost", "cus_nobody"),
            signature: "t=0,v1=any".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(outcome, IngestOutcome::Unmapped);
}

#[tokio::test]
async fn concurrent_duplicate_deliveries_apply_exactly_once() {
    let fixture = Fixture::new();
    let workspace_id = fixture.create_workspace("alice", "Acme").await;
    let handler = Arc::new(fixture.ingest_handler());

    let mut tasks = Vec::new();
    for _ in 0..8 {
        let handler = handler.clone();
        let payload = checkout_completed_event("evt_race", &workspace_id);
        tasks.push(tokio::spawn(async move {
            handler
                .handle(IngestBillingEventCommand {
                    payload,
                    signature: "t=0,v1=any".to_string(),
                })
                .await
                .unwrap()
        }));
    }

    let mut applied = 0;
    let mut duplicates = 0;
    for task in tasks {
        match task.await.unwrap() {
            IngestOutcome::Applied => applied += 1,
            IngestOutcome::AlreadyProcessed => duplicates += 1,
            IngestOutcome::Unmapped => panic!("event should have mapped"),
        }
    }

    assert_eq!(applied, 1);
    assert_eq!(duplicates, 7);
    assert_eq!(fixture.plan_of(&workspace_id).await, Plan::Pro);
}
