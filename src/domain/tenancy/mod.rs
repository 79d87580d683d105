//! Tenancy domain module.
//!
//! Workspaces are the tenant boundary; memberships grant users access to
//! them at a role. The workspace aggregate also owns the billing plan
//! field and is the only place plan transitions happen.
//!
//! # Module Structure
//!
//! - `workspace` - Workspace aggregate (plan state machine lives here)
//! - `membership` - Membership join entity with owner flag
//! - `role` - Role levels and the role lattice
//! - `plan` - Billing plan tiers and plan gating
//! - `access` - Request-scoped AccessContext and denial reasons
//! - `errors` - Tenancy rule violations as typed errors

mod access;
mod errors;
mod membership;
mod plan;
mod role;
mod workspace;

pub use access::{AccessContext, AccessDenied};
pub use errors::TenancyError;
pub use membership::Membership;
pub use plan::{gate_plan, Plan, PlanDecision};
pub use role::Role;
pub use workspace::{PlanTransition, Workspace};
