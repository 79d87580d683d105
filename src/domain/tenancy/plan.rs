//! Billing plan tiers and plan gating.

use serde::{Deserialize, Serialize};

/// Billing plan attached to a workspace (not to a user).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    /// Free tier - the default for every new workspace.
    Free,

    /// Paid tier - unlocked through the billing state machine only.
    Pro,
}

impl Plan {
    /// Returns true if this plan meets the given requirement.
    ///
    /// `Pro` satisfies everything; `Free` satisfies only `Free`.
    pub fn satisfies(&self, required: Plan) -> bool {
        self.rank() >= required.rank()
    }

    fn rank(&self) -> u8 {
        match self {
            Plan::Free => 0,
            Plan::Pro => 1,
        }
    }

    /// Returns the wire representation of this plan.
    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Free => "free",
            Plan::Pro => "pro",
        }
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of gating an operation on a workspace's plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanDecision {
    /// The workspace's plan covers the requirement.
    Allowed,
    /// The workspace must upgrade before running this operation.
    PaymentRequired,
}

/// Checks a workspace plan against an operation's requirement.
///
/// Pure decision only; how a `PaymentRequired` is surfaced (structured
/// response vs. redirect) is declared by the calling surface.
pub fn gate_plan(plan: Plan, required: Plan) -> PlanDecision {
    if plan.satisfies(required) {
        PlanDecision::Allowed
    } else {
        PlanDecision::PaymentRequired
    }
}
