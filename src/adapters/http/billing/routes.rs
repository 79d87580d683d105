//! Axum router configuration for billing endpoints.

use axum::{middleware, routing::post, Router};

use crate::domain::tenancy::Role;

use super::super::middleware::{auth_middleware, workspace_guard};
use super::super::state::AppState;
use super::handlers::{confirm_checkout, handle_billing_webhook, start_checkout};

/// Create the billing API router.
///
/// # Routes
/// - `POST /workspaces/:workspace_id/checkout` - Start an upgrade checkout (admin)
/// - `POST /confirm` - Confirm a checkout by its session token
pub fn billing_routes(state: &AppState) -> Router<AppState> {
    let scoped = Router::new()
        .route("/checkout", post(start_checkout))
        .layer(middleware::from_fn_with_state(
            state.workspace_guard(Role::Admin),
            workspace_guard,
        ));

    let user_level = Router::new()
        .route("/confirm", post(confirm_checkout))
        .layer(middleware::from_fn_with_state(
            state.session_validator.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(user_level)
        .nest("/workspaces/:workspace_id", scoped)
}

/// Create the webhook router.
///
/// Separate from the billing routes because webhook requests carry no
/// user session; they are authenticated by signature instead.
///
/// # Routes
/// - `POST /billing` - Ingest a signed billing event
pub fn webhook_routes() -> Router<AppState> {
    Router::new().route("/billing", post(handle_billing_webhook))
}
