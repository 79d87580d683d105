//! HTTP DTOs for workspace and membership endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::tenancy::{Membership, Workspace};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to create a workspace.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorkspaceRequest {
    pub name: String,
}

/// Request to add a member to the workspace.
#[derive(Debug, Clone, Deserialize)]
pub struct AddMemberRequest {
    pub user_id: String,
    /// `member` or `admin`.
    pub role: String,
}

/// Request to change a member's role.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMemberRoleRequest {
    pub role: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Workspace details.
#[derive(Debug, Clone, Serialize)]
pub struct WorkspaceResponse {
    pub id: String,
    pub name: String,
    pub plan: String,
    pub upgraded_at: Option<String>,
    pub created_at: String,
}

impl From<Workspace> for WorkspaceResponse {
    fn from(workspace: Workspace) -> Self {
        Self {
            id: workspace.id.to_string(),
            name: workspace.name,
            plan: workspace.plan.as_str().to_string(),
            upgraded_at: workspace.upgraded_at.map(|t| t.to_string()),
            created_at: workspace.created_at.to_string(),
        }
    }
}

/// A single workspace member.
#[derive(Debug, Clone, Serialize)]
pub struct MemberResponse {
    pub user_id: String,
    pub role: String,
    pub is_owner: bool,
    pub created_at: String,
}

impl From<Membership> for MemberResponse {
    fn from(membership: Membership) -> Self {
        Self {
            user_id: membership.user_id.to_string(),
            role: membership.role.as_str().to_string(),
            is_owner: membership.is_owner,
            created_at: membership.created_at.to_string(),
        }
    }
}

/// Workspace member listing.
#[derive(Debug, Clone, Serialize)]
pub struct MembersResponse {
    pub members: Vec<MemberResponse>,
}

/// The caller's last-used workspace, if any is remembered.
#[derive(Debug, Clone, Serialize)]
pub struct LastWorkspaceResponse {
    pub workspace_id: Option<String>,
}
