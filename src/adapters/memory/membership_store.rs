//! In-memory membership store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{UserId, WorkspaceId};
use crate::domain::tenancy::{Membership, Role, TenancyError};
use crate::ports::MembershipStore;

/// Map-backed membership store.
///
/// All owner checks happen under the same write lock as the mutation,
/// mirroring the conditional statements the postgres adapter uses.
pub struct InMemoryMembershipStore {
    memberships: RwLock<HashMap<(UserId, WorkspaceId), Membership>>,
}

impl InMemoryMembershipStore {
    pub fn new() -> Self {
        Self {
            memberships: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryMembershipStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MembershipStore for InMemoryMembershipStore {
    async fn insert(&self, membership: &Membership) -> Result<(), TenancyError> {
        let key = (membership.user_id.clone(), membership.workspace_id);
        let mut memberships = self.memberships.write().await;
        if memberships.contains_key(&key) {
            return Err(TenancyError::AlreadyMember {
                user_id: membership.user_id.clone(),
                workspace_id: membership.workspace_id,
            });
        }
        memberships.insert(key, membership.clone());
        Ok(())
    }

    async fn find(
        &self,
        user_id: &UserId,
        workspace_id: &WorkspaceId,
    ) -> Result<Option<Membership>, TenancyError> {
        let memberships = self.memberships.read().await;
        Ok(memberships.get(&(user_id.clone(), *workspace_id)).cloned())
    }

    async fn remove(
        &self,
        user_id: &UserId,
        workspace_id: &WorkspaceId,
    ) -> Result<(), TenancyError> {
        let key = (user_id.clone(), *workspace_id);
        let mut memberships = self.memberships.write().await;
        match memberships.get(&key) {
            None => Err(TenancyError::MembershipNotFound),
            Some(membership) if membership.is_owner => Err(TenancyError::CannotRemoveOwner),
            Some(_) => {
                memberships.remove(&key);
                Ok(())
            }
        }
    }

    async fn update_role(
        &self,
        user_id: &UserId,
        workspace_id: &WorkspaceId,
        role: Role,
    ) -> Result<(), TenancyError> {
        let key = (user_id.clone(), *workspace_id);
        let mut memberships = self.memberships.write().await;
        match memberships.get_mut(&key) {
            None => Err(TenancyError::MembershipNotFound),
            Some(membership) if membership.is_owner => Err(TenancyError::CannotChangeOwnerRole),
            Some(membership) => {
                membership.role = role;
                Ok(())
            }
        }
    }

    async fn list_for_workspace(
        &self,
        workspace_id: &WorkspaceId,
    ) -> Result<Vec<Membership>, TenancyError> {
        let memberships = self.memberships.read().await;
        Ok(memberships
            .values()
            .filter(|m| m.workspace_id == *workspace_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn insert_then_find() {
        let store = InMemoryMembershipStore::new();
        let workspace_id = WorkspaceId::new();
        let membership = Membership::member(user("u1"), workspace_id, Role::Member);

        store.insert(&membership).await.unwrap();

        let found = store.find(&user("u1"), &workspace_id).await.unwrap();
        assert_eq!(found, Some(membership));
    }

    #[tokio::test]
    async fn duplicate_insert_is_already_member() {
        let store = InMemoryMembershipStore::new();
        let workspace_id = WorkspaceId::new();
        let membership = Membership::member(user("u1"), workspace_id, Role::Member);

        store.insert(&membership).await.unwrap();
        let result = store.insert(&membership).await;

        assert!(matches!(result, Err(TenancyError::AlreadyMember { .. })));
    }

    #[tokio::test]
    async fn list_filters_by_workspace() {
        let store = InMemoryMembershipStore::new();
        let ws_a = WorkspaceId::new();
        let ws_b = WorkspaceId::new();
        store.insert(&Membership::owner(user("u1"), ws_a)).await.unwrap();
        store.insert(&Membership::member(user("u2"), ws_a, Role::Member)).await.unwrap();
        store.insert(&Membership::owner(user("u1"), ws_b)).await.unwrap();

        let members = store.list_for_workspace(&ws_a).await.unwrap();
        assert_eq!(members.len(), 2);
    }
}
