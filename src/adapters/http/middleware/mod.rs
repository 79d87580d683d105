//! HTTP middleware for axum.
//!
//! - `auth` - Bearer token validation and identity extractors
//! - `workspace` - workspace guard resolving access per request
//! - `plan_gate` - plan entitlement gate composed after the guard

pub mod auth;
pub mod plan_gate;
pub mod workspace;

pub use auth::{auth_middleware, AuthRejection, AuthState, OptionalAuth, RequireAuth};
pub use plan_gate::{plan_gate, PlanGate, RejectStyle};
pub use workspace::{workspace_guard, WorkspaceAccess, WorkspaceGuard};
