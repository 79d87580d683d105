//! HTTP handlers for workspace and membership endpoints.
//!
//! Workspace-scoped handlers run behind the workspace guard and read
//! their `AccessContext` from request extensions. Admin-only mutations
//! re-check the role and answer with the same uniform 404 the guard
//! uses, so role probing learns nothing.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use uuid::Uuid;

use crate::application::handlers::tenancy::{
    AddMemberCommand, CreateWorkspaceCommand, RemoveMemberCommand, UpdateMemberRoleCommand,
};
use crate::domain::foundation::UserId;
use crate::domain::tenancy::{AccessContext, Role, TenancyError};

use super::super::error::ApiError;
use super::super::middleware::{RequireAuth, WorkspaceAccess};
use super::super::state::AppState;
use super::dto::{
    AddMemberRequest, CreateWorkspaceRequest, LastWorkspaceResponse, MemberResponse,
    MembersResponse, UpdateMemberRoleRequest, WorkspaceResponse,
};

fn require_admin(access: &AccessContext) -> Result<(), ApiError> {
    if access.has_role(Role::Admin) {
        Ok(())
    } else {
        // Uniform denial, same as the guard's.
        Err(ApiError::from(TenancyError::WorkspaceNotFound))
    }
}

fn parse_user_id(raw: &str) -> Result<UserId, ApiError> {
    UserId::new(raw)
        .ok_or_else(|| ApiError::from(TenancyError::validation("user_id must not be blank")))
}

/// POST /api/workspaces - Create a workspace owned by the caller
pub async fn create_workspace(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<CreateWorkspaceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.create_workspace_handler();
    let cmd = CreateWorkspaceCommand {
        name: request.name,
        owner_id: user.id,
    };

    let workspace = handler.handle(cmd).await?;

    Ok((StatusCode::CREATED, Json(WorkspaceResponse::from(workspace))))
}

/// GET /api/workspaces/last - The caller's last-used workspace
pub async fn last_workspace(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Json<LastWorkspaceResponse> {
    // The recall is a hint; a cache failure degrades to "none".
    let workspace_id = match state.workspace_recall.last_workspace(&user.id).await {
        Ok(found) => found,
        Err(e) => {
            tracing::warn!(error = %e, "workspace recall lookup failed");
            None
        }
    };

    Json(LastWorkspaceResponse {
        workspace_id: workspace_id.map(|id| id.to_string()),
    })
}

/// GET /api/workspaces/:workspace_id - Workspace details
pub async fn get_workspace(
    State(state): State<AppState>,
    WorkspaceAccess(access): WorkspaceAccess,
) -> Result<impl IntoResponse, ApiError> {
    let workspace = state
        .workspace_store
        .find_by_id(&access.workspace_id)
        .await?
        .ok_or(TenancyError::WorkspaceNotFound)?;

    Ok(Json(WorkspaceResponse::from(workspace)))
}

/// GET /api/workspaces/:workspace_id/members - List members
pub async fn list_members(
    State(state): State<AppState>,
    WorkspaceAccess(access): WorkspaceAccess,
) -> Result<impl IntoResponse, ApiError> {
    let members = state
        .membership_store
        .list_for_workspace(&access.workspace_id)
        .await?;

    Ok(Json(MembersResponse {
        members: members.into_iter().map(MemberResponse::from).collect(),
    }))
}

/// POST /api/workspaces/:workspace_id/members - Add a member (admin)
pub async fn add_member(
    State(state): State<AppState>,
    WorkspaceAccess(access): WorkspaceAccess,
    Json(request): Json<AddMemberRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(&access)?;

    let handler = state.add_member_handler();
    let cmd = AddMemberCommand {
        workspace_id: access.workspace_id,
        user_id: parse_user_id(&request.user_id)?,
        role: request.role.parse()?,
    };

    let membership = handler.handle(cmd).await?;

    Ok((StatusCode::CREATED, Json(MemberResponse::from(membership))))
}

/// DELETE /api/workspaces/:workspace_id/members/:user_id - Remove a member (admin)
pub async fn remove_member(
    State(state): State<AppState>,
    WorkspaceAccess(access): WorkspaceAccess,
    Path((_, user_id)): Path<(Uuid, String)>,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(&access)?;

    let handler = state.remove_member_handler();
    let cmd = RemoveMemberCommand {
        workspace_id: access.workspace_id,
        user_id: parse_user_id(&user_id)?,
    };

    handler.handle(cmd).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/workspaces/:workspace_id/members/:user_id/role - Change a role (admin)
pub async fn update_member_role(
    State(state): State<AppState>,
    WorkspaceAccess(access): WorkspaceAccess,
    Path((_, user_id)): Path<(Uuid, String)>,
    Json(request): Json<UpdateMemberRoleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(&access)?;

    let handler = state.update_member_role_handler();
    let cmd = UpdateMemberRoleCommand {
        workspace_id: access.workspace_id,
        user_id: parse_user_id(&user_id)?,
        role: request.role.parse()?,
    };

    handler.handle(cmd).await?;

    Ok(StatusCode::NO_CONTENT)
}
