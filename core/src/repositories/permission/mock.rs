//! Mock implementation of PermissionRepository for testing.
//!
//! Shares the [`RbacStore`] with [`MockRoleRepository`] so grants made
//! here are visible through role lookups.
//!
//! [`RbacStore`]: crate::repositories::role::mock::RbacStore
//! [`MockRoleRepository`]: crate::repositories::role::mock::MockRoleRepository

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::role::Permission;
use crate::errors::DomainError;
use crate::repositories::role::mock::RbacStore;

use super::r#trait::PermissionRepository;

/// In-memory permission repository over a shared [`RbacStore`]
pub struct MockPermissionRepository {
    store: Arc<RbacStore>,
}

impl MockPermissionRepository {
    pub fn new(store: Arc<RbacStore>) -> Self {
        Self { store }
    }
}

impl Default for MockPermissionRepository {
    fn default() -> Self {
        Self::new(RbacStore::new())
    }
}

#[async_trait]
impl PermissionRepository for MockPermissionRepository {
    async fn create(&self, permission: Permission) -> Result<Permission, DomainError> {
        let mut state = self.store.state.write().await;

        let duplicate = state
            .permissions
            .values()
            .any(|p| p.resource == permission.resource && p.action == permission.action);
        if duplicate {
            return Err(DomainError::already_exists("permission"));
        }
        state.permissions.insert(permission.id, permission.clone());
        Ok(permission)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Permission>, DomainError> {
        let state = self.store.state.read().await;
        Ok(state.permissions.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Permission>, DomainError> {
        let state = self.store.state.read().await;
        let mut permissions: Vec<Permission> = state.permissions.values().cloned().collect();
        permissions.sort_by(|a, b| a.resource.cmp(&b.resource).then(a.action.cmp(&b.action)));
        Ok(permissions)
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let mut state = self.store.state.write().await;

        if !state.permissions.contains_key(&id) {
            return Err(DomainError::not_found("permission"));
        }
        let granted = state
            .roles
            .values()
            .any(|r| r.permissions.iter().any(|p| p.id == id));
        if granted {
            return Err(DomainError::conflict("permission is granted to roles"));
        }
        state.permissions.remove(&id);
        Ok(())
    }

    async fn assign_to_role(&self, role_id: Uuid, permission_id: Uuid) -> Result<(), DomainError> {
        let mut state = self.store.state.write().await;

        let permission = state
            .permissions
            .get(&permission_id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("permission"))?;
        let role = state
            .roles
            .get_mut(&role_id)
            .ok_or_else(|| DomainError::not_found("role"))?;
        role.add_permission(permission);
        Ok(())
    }

    async fn remove_from_role(
        &self,
        role_id: Uuid,
        permission_id: Uuid,
    ) -> Result<(), DomainError> {
        let mut state = self.store.state.write().await;

        let role = state
            .roles
            .get_mut(&role_id)
            .ok_or_else(|| DomainError::not_found("role"))?;
        role.remove_permission(permission_id);
        Ok(())
    }
}
