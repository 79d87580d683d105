//! Axum router configuration for workspace endpoints.

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::domain::tenancy::Role;

use super::super::middleware::{auth_middleware, workspace_guard};
use super::super::state::AppState;
use super::handlers::{
    add_member, create_workspace, get_workspace, last_workspace, list_members, remove_member,
    update_member_role,
};

/// Create the workspace API router.
///
/// # Routes
///
/// ## User endpoints (Bearer token)
/// - `POST /` - Create a workspace owned by the caller
/// - `GET /last` - The caller's last-used workspace
///
/// ## Workspace-scoped endpoints (workspace guard)
/// - `GET /:workspace_id` - Workspace details
/// - `GET /:workspace_id/members` - List members
/// - `POST /:workspace_id/members` - Add a member (admin)
/// - `DELETE /:workspace_id/members/:user_id` - Remove a member (admin)
/// - `PUT /:workspace_id/members/:user_id/role` - Change a role (admin)
pub fn workspace_routes(state: &AppState) -> Router<AppState> {
    let scoped = Router::new()
        .route("/", get(get_workspace))
        .route("/members", get(list_members).post(add_member))
        .route("/members/:user_id", delete(remove_member))
        .route("/members/:user_id/role", put(update_member_role))
        .layer(middleware::from_fn_with_state(
            state.workspace_guard(Role::Member),
            workspace_guard,
        ));

    let user_level = Router::new()
        .route("/", post(create_workspace))
        .route("/last", get(last_workspace))
        .layer(middleware::from_fn_with_state(
            state.session_validator.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(user_level)
        .nest("/:workspace_id", scoped)
}
