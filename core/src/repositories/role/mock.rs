//! Mock implementation of RoleRepository for testing.
//!
//! Roles, permissions, and user assignments live in a single shared
//! [`RbacStore`] so the role and permission mocks observe each other's
//! writes, the way they would against one database.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::role::{Permission, Role};
use crate::errors::DomainError;

use super::r#trait::RoleRepository;

#[derive(Default)]
pub(crate) struct RbacState {
    pub(crate) roles: HashMap<Uuid, Role>,
    pub(crate) permissions: HashMap<Uuid, Permission>,
    /// user id -> role ids held
    pub(crate) assignments: HashMap<Uuid, Vec<Uuid>>,
}

/// Shared backing store for the RBAC mocks
#[derive(Default)]
pub struct RbacStore {
    pub(crate) state: RwLock<RbacState>,
}

impl RbacStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

/// In-memory role repository over a shared [`RbacStore`]
pub struct MockRoleRepository {
    store: Arc<RbacStore>,
}

impl MockRoleRepository {
    pub fn new(store: Arc<RbacStore>) -> Self {
        Self { store }
    }
}

impl Default for MockRoleRepository {
    fn default() -> Self {
        Self::new(RbacStore::new())
    }
}

#[async_trait]
impl RoleRepository for MockRoleRepository {
    async fn create(&self, role: Role) -> Result<Role, DomainError> {
        let mut state = self.store.state.write().await;

        if state.roles.values().any(|r| r.name == role.name) {
            return Err(DomainError::already_exists("role"));
        }
        state.roles.insert(role.id, role.clone());
        Ok(role)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Role>, DomainError> {
        let state = self.store.state.read().await;
        Ok(state.roles.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, DomainError> {
        let state = self.store.state.read().await;
        Ok(state.roles.values().find(|r| r.name == name).cloned())
    }

    async fn list(&self) -> Result<Vec<Role>, DomainError> {
        let state = self.store.state.read().await;
        let mut roles: Vec<Role> = state.roles.values().cloned().collect();
        roles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(roles)
    }

    async fn update(&self, role: Role) -> Result<Role, DomainError> {
        let mut state = self.store.state.write().await;

        if !state.roles.contains_key(&role.id) {
            return Err(DomainError::not_found("role"));
        }
        let collision = state
            .roles
            .values()
            .any(|r| r.id != role.id && r.name == role.name);
        if collision {
            return Err(DomainError::already_exists("role"));
        }

        // Grants are managed through the permission repository; an update
        // only touches the name and description.
        let stored = state.roles.get_mut(&role.id).unwrap();
        stored.name = role.name;
        stored.description = role.description;
        stored.updated_at = role.updated_at;
        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let mut state = self.store.state.write().await;

        if !state.roles.contains_key(&id) {
            return Err(DomainError::not_found("role"));
        }
        let assigned = state.assignments.values().any(|roles| roles.contains(&id));
        if assigned {
            return Err(DomainError::conflict("role is assigned to users"));
        }
        state.roles.remove(&id);
        Ok(())
    }

    async fn assign_to_user(&self, user_id: Uuid, role_id: Uuid) -> Result<(), DomainError> {
        let mut state = self.store.state.write().await;

        if !state.roles.contains_key(&role_id) {
            return Err(DomainError::not_found("role"));
        }
        let held = state.assignments.entry(user_id).or_default();
        if !held.contains(&role_id) {
            held.push(role_id);
        }
        Ok(())
    }

    async fn remove_from_user(&self, user_id: Uuid, role_id: Uuid) -> Result<(), DomainError> {
        let mut state = self.store.state.write().await;

        if let Some(held) = state.assignments.get_mut(&user_id) {
            held.retain(|id| *id != role_id);
        }
        Ok(())
    }

    async fn roles_for_user(&self, user_id: Uuid) -> Result<Vec<Role>, DomainError> {
        let state = self.store.state.read().await;

        let held = match state.assignments.get(&user_id) {
            Some(ids) => ids,
            None => return Ok(Vec::new()),
        };
        Ok(held
            .iter()
            .filter_map(|id| state.roles.get(id).cloned())
            .collect())
    }
}
