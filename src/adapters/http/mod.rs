//! HTTP adapters - REST API implementation.

pub mod billing;
pub mod error;
pub mod middleware;
pub mod state;
pub mod tenancy;

use axum::Router;

pub use error::{ApiError, ErrorResponse};
pub use state::AppState;

/// Assemble the full API router.
///
/// Mounts the workspace, billing, and webhook route groups under
/// `/api` and attaches the shared state.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/workspaces", tenancy::workspace_routes(&state))
        .nest("/api/billing", billing::billing_routes(&state))
        .nest("/api/webhooks", billing::webhook_routes())
        .with_state(state)
}
