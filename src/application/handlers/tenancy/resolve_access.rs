//! ResolveAccessHandler - builds the per-request access context.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, WorkspaceId};
use crate::domain::tenancy::{AccessContext, AccessDenied, Role};
use crate::ports::{MembershipStore, SessionValidator, WorkspaceRecall, WorkspaceStore};

/// Command to resolve a caller's access to a workspace.
#[derive(Debug, Clone)]
pub struct ResolveAccessCommand {
    /// Bearer token from the request, if one was presented.
    pub token: Option<String>,
    /// Workspace named by the request path.
    pub workspace_id: WorkspaceId,
    /// Minimum role the surface requires.
    pub minimum_role: Role,
}

/// Handler that resolves a request to an access context.
///
/// Checks run in a fixed order so every rejection is attributable:
/// session first, then workspace existence, then membership, then role.
/// Missing workspace and missing membership produce the same `NotFound`
/// so non-members cannot probe which workspace ids exist.
///
/// Fail-secure: an infrastructure failure during any check denies the
/// request rather than letting it through.
pub struct ResolveAccessHandler {
    session_validator: Arc<dyn SessionValidator>,
    workspace_store: Arc<dyn WorkspaceStore>,
    membership_store: Arc<dyn MembershipStore>,
    workspace_recall: Arc<dyn WorkspaceRecall>,
}

impl ResolveAccessHandler {
    pub fn new(
        session_validator: Arc<dyn SessionValidator>,
        workspace_store: Arc<dyn WorkspaceStore>,
        membership_store: Arc<dyn MembershipStore>,
        workspace_recall: Arc<dyn WorkspaceRecall>,
    ) -> Self {
        Self {
            session_validator,
            workspace_store,
            membership_store,
            workspace_recall,
        }
    }

    pub async fn handle(&self, cmd: ResolveAccessCommand) -> Result<AccessContext, AccessDenied> {
        // 1. Session
        let user = self.authenticate(cmd.token.as_deref()).await?;

        // 2. Workspace existence
        let workspace = match self.workspace_store.find_by_id(&cmd.workspace_id).await {
            Ok(Some(workspace)) => workspace,
            Ok(None) => return Err(AccessDenied::NotFound),
            Err(err) => {
                tracing::error!(error = %err, workspace_id = %cmd.workspace_id, "workspace lookup failed");
                return Err(AccessDenied::NotFound);
            }
        };

        // 3. Membership
        let membership = match self
            .membership_store
            .find(&user.id, &cmd.workspace_id)
            .await
        {
            Ok(Some(membership)) => membership,
            Ok(None) => return Err(AccessDenied::NotFound),
            Err(err) => {
                tracing::error!(error = %err, user_id = %user.id, "membership lookup failed");
                return Err(AccessDenied::NotFound);
            }
        };

        // 4. Role
        if !membership.role.satisfies(cmd.minimum_role) {
            return Err(AccessDenied::Forbidden);
        }

        // Best effort only; a recall failure never fails the request.
        if let Err(err) = self
            .workspace_recall
            .remember(&user.id, &cmd.workspace_id)
            .await
        {
            tracing::warn!(error = %err, "failed to record last-used workspace");
        }

        Ok(AccessContext {
            user,
            workspace_id: workspace.id,
            role: membership.role,
            is_owner: membership.is_owner,
            plan: workspace.plan,
        })
    }

    async fn authenticate(&self, token: Option<&str>) -> Result<AuthenticatedUser, AccessDenied> {
        let token = token.ok_or(AccessDenied::Unauthenticated)?;
        self.session_validator.validate(token).await.map_err(|err| {
            tracing::debug!(error = %err, "session validation failed");
            AccessDenied::Unauthenticated
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockSessionValidator;
    use crate::adapters::memory::{
        InMemoryMembershipStore, InMemoryWorkspaceRecall, InMemoryWorkspaceStore,
    };
    use crate::domain::foundation::UserId;
    use crate::domain::tenancy::{Membership, Workspace};

    struct Fixture {
        handler: ResolveAccessHandler,
        workspace_id: WorkspaceId,
        recall: Arc<InMemoryWorkspaceRecall>,
    }

    fn user_id() -> UserId {
        UserId::new("user-1").unwrap()
    }

    async fn fixture(role: Option<Role>) -> Fixture {
        let memberships = Arc::new(InMemoryMembershipStore::new());
        let workspaces = Arc::new(InMemoryWorkspaceStore::with_memberships(memberships.clone()));
        let recall = Arc::new(InMemoryWorkspaceRecall::new());
        let validator = Arc::new(MockSessionValidator::accepting("token-1", user_id()));

        let workspace = Workspace::create(WorkspaceId::new(), "Acme");
        let workspace_id = workspace.id;
        let owner = Membership::owner(UserId::new("owner").unwrap(), workspace_id);
        workspaces.create_with_owner(&workspace, &owner).await.unwrap();

        if let Some(role) = role {
            let membership = Membership::member(user_id(), workspace_id, role);
            memberships.insert(&membership).await.unwrap();
        }

        Fixture {
            handler: ResolveAccessHandler::new(validator, workspaces, memberships, recall.clone()),
            workspace_id,
            recall,
        }
    }

    fn command(workspace_id: WorkspaceId, minimum_role: Role) -> ResolveAccessCommand {
        ResolveAccessCommand {
            token: Some("token-1".to_string()),
            workspace_id,
            minimum_role,
        }
    }

    #[tokio::test]
    async fn member_resolves_to_access_context() {
        let fx = fixture(Some(Role::Member)).await;

        let ctx = fx
            .handler
            .handle(command(fx.workspace_id, Role::Member))
            .await
            .unwrap();

        assert_eq!(ctx.workspace_id, fx.workspace_id);
        assert_eq!(ctx.role, Role::Member);
        assert!(!ctx.is_owner);
    }

    #[tokio::test]
    async fn missing_token_is_unauthenticated() {
        let fx = fixture(Some(Role::Member)).await;
        let cmd = ResolveAccessCommand {
            token: None,
            workspace_id: fx.workspace_id,
            minimum_role: Role::Member,
        };

        assert_eq!(fx.handler.handle(cmd).await, Err(AccessDenied::Unauthenticated));
    }

    #[tokio::test]
    async fn invalid_token_is_unauthenticated() {
        let fx = fixture(Some(Role::Member)).await;
        let cmd = ResolveAccessCommand {
            token: Some("wrong-token".to_string()),
            workspace_id: fx.workspace_id,
            minimum_role: Role::Member,
        };

        assert_eq!(fx.handler.handle(cmd).await, Err(AccessDenied::Unauthenticated));
    }

    #[tokio::test]
    async fn unknown_workspace_is_not_found() {
        let fx = fixture(Some(Role::Member)).await;

        let result = fx.handler.handle(command(WorkspaceId::new(), Role::Member)).await;

        assert_eq!(result, Err(AccessDenied::NotFound));
    }

    #[tokio::test]
    async fn non_member_gets_the_same_not_found() {
        let fx = fixture(None).await;

        let result = fx.handler.handle(command(fx.workspace_id, Role::Member)).await;

        assert_eq!(result, Err(AccessDenied::NotFound));
    }

    #[tokio::test]
    async fn insufficient_role_is_forbidden() {
        let fx = fixture(Some(Role::Member)).await;

        let result = fx.handler.handle(command(fx.workspace_id, Role::Admin)).await;

        assert_eq!(result, Err(AccessDenied::Forbidden));
    }

    #[tokio::test]
    async fn successful_resolution_records_last_workspace() {
        let fx = fixture(Some(Role::Member)).await;

        fx.handler
            .handle(command(fx.workspace_id, Role::Member))
            .await
            .unwrap();

        let remembered = fx.recall.last_workspace(&user_id()).await.unwrap();
        assert_eq!(remembered, Some(fx.workspace_id));
    }

    #[tokio::test]
    async fn denied_request_does_not_record_recall() {
        let fx = fixture(Some(Role::Member)).await;

        let _ = fx.handler.handle(command(fx.workspace_id, Role::Admin)).await;

        assert_eq!(fx.recall.last_workspace(&user_id()).await.unwrap(), None);
    }
}
