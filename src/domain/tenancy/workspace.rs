//! Workspace aggregate entity.
//!
//! A workspace is the tenant boundary: all business data and the billing
//! plan hang off it. Created exactly once per onboarding event and never
//! implicitly deleted.
//!
//! # Invariants
//!
//! - `plan` is mutated only through `upgrade_to_pro` / `downgrade_to_free`,
//!   the billing state machine's transition functions
//! - Both transitions are idempotent: re-applying toward the current
//!   state is a no-op, not an error

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, WorkspaceId};

use super::Plan;

/// Outcome of a plan transition request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanTransition {
    /// The plan changed as a result of this call.
    Applied,
    /// The workspace was already in the target state.
    Noop,
}

/// Workspace aggregate - the tenant boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    /// Unique identifier for this workspace.
    pub id: WorkspaceId,

    /// Display name shown to members.
    pub name: String,

    /// Current billing plan.
    pub plan: Plan,

    /// Payment provider customer reference (set on first upgrade).
    pub billing_customer_ref: Option<String>,

    /// When the workspace last moved to a paid plan.
    pub upgraded_at: Option<Timestamp>,

    /// When the workspace was created.
    pub created_at: Timestamp,

    /// When the workspace was last updated.
    pub updated_at: Timestamp,
}

impl Workspace {
    /// Creates a new workspace on the free plan.
    pub fn create(id: WorkspaceId, name: impl Into<String>) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            name: name.into(),
            plan: Plan::Free,
            billing_customer_ref: None,
            upgraded_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Moves the workspace to the `Pro` plan.
    ///
    /// Records the billing customer reference when newly provided and
    /// stamps the upgrade timestamp. Idempotent: an already-`Pro`
    /// workspace is left untouched and `Noop` is returned.
    pub fn upgrade_to_pro(&mut self, customer_ref: Option<String>) -> PlanTransition {
        if self.plan == Plan::Pro {
            return PlanTransition::Noop;
        }

        self.plan = Plan::Pro;
        if let Some(reference) = customer_ref {
            self.billing_customer_ref.get_or_insert(reference);
        }
        let now = Timestamp::now();
        self.upgraded_at = Some(now);
        self.updated_at = now;
        PlanTransition::Applied
    }

    /// Moves the workspace back to the `Free` plan.
    ///
    /// The customer reference is kept so a later re-upgrade maps to the
    /// same provider customer. Idempotent on an already-`Free` workspace.
    pub fn downgrade_to_free(&mut self) -> PlanTransition {
        if self.plan == Plan::Free {
            return PlanTransition::Noop;
        }

        self.plan = Plan::Free;
        self.updated_at = Timestamp::now();
        PlanTransition::Applied
    }
}
