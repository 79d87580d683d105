//! Workspace persistence port.

use async_trait::async_trait;

use crate::domain::foundation::WorkspaceId;
use crate::domain::tenancy::{Membership, TenancyError, Workspace};

/// Port for workspace aggregate persistence.
#[async_trait]
pub trait WorkspaceStore: Send + Sync {
    /// Persists a new workspace together with its owning membership.
    ///
    /// The two rows are written in one atomic unit so a workspace can
    /// never exist without an owner.
    async fn create_with_owner(
        &self,
        workspace: &Workspace,
        owner: &Membership,
    ) -> Result<(), TenancyError>;

    /// Loads a workspace by id.
    async fn find_by_id(&self, id: &WorkspaceId) -> Result<Option<Workspace>, TenancyError>;

    /// Loads a workspace by its billing customer reference.
    ///
    /// Used when a billing event identifies the tenant only by the
    /// provider's customer id.
    async fn find_by_customer_ref(
        &self,
        customer_ref: &str,
    ) -> Result<Option<Workspace>, TenancyError>;

    /// Writes back a modified workspace aggregate.
    ///
    /// # Errors
    ///
    /// Returns `WorkspaceNotFound` if the workspace no longer exists.
    async fn update(&self, workspace: &Workspace) -> Result<(), TenancyError>;
}
