//! Main RBAC service implementation

use std::sync::Arc;

use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use crate::domain::entities::role::{Permission, PermissionSet, Role};
use crate::domain::events::Event;
use crate::errors::DomainError;
use crate::repositories::{EventPublisher, PermissionRepository, RoleRepository, UserRepository};

/// Handles role and permission administration.
///
/// Grant changes only affect access tokens issued afterwards; a token in
/// flight keeps the permission claims it was issued with.
pub struct RbacService<U, R, P, E>
where
    U: UserRepository,
    R: RoleRepository,
    P: PermissionRepository,
    E: EventPublisher,
{
    users: Arc<U>,
    roles: Arc<R>,
    permissions: Arc<P>,
    events: Arc<E>,
}

impl<U, R, P, E> RbacService<U, R, P, E>
where
    U: UserRepository,
    R: RoleRepository,
    P: PermissionRepository,
    E: EventPublisher,
{
    pub fn new(users: Arc<U>, roles: Arc<R>, permissions: Arc<P>, events: Arc<E>) -> Self {
        Self {
            users,
            roles,
            permissions,
            events,
        }
    }

    /// Creates a role.
    ///
    /// # Returns
    /// * `Err(DomainError::Validation)` - Invalid name
    /// * `Err(DomainError::AlreadyExists)` - Name already taken
    pub async fn create_role(&self, name: &str, description: &str) -> Result<Role, DomainError> {
        let role = Role::new(name, description)?;
        self.roles.create(role).await
    }

    /// Fetches a role by id.
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - No such role
    pub async fn get_role(&self, id: Uuid) -> Result<Role, DomainError> {
        self.roles
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("role"))
    }

    /// Fetches a role by its unique name
    pub async fn get_role_by_name(&self, name: &str) -> Result<Role, DomainError> {
        self.roles
            .find_by_name(&name.trim().to_lowercase())
            .await?
            .ok_or_else(|| DomainError::not_found("role"))
    }

    pub async fn list_roles(&self) -> Result<Vec<Role>, DomainError> {
        self.roles.list().await
    }

    /// Renames a role or changes its description. Grants are untouched.
    pub async fn update_role(
        &self,
        id: Uuid,
        name: &str,
        description: &str,
    ) -> Result<Role, DomainError> {
        let mut role = self.get_role(id).await?;

        role.name = name.trim().to_lowercase();
        role.description = description.trim().to_string();
        role.validate()?;
        role.updated_at = Utc::now();

        self.roles.update(role).await
    }

    /// Deletes a role.
    ///
    /// # Returns
    /// * `Err(DomainError::Conflict)` - Role is still assigned to users
    pub async fn delete_role(&self, id: Uuid) -> Result<(), DomainError> {
        self.roles.delete(id).await
    }

    /// Assigns a role to a user. Idempotent.
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - User or role does not exist
    pub async fn assign_role(&self, user_id: Uuid, role_id: Uuid) -> Result<(), DomainError> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(DomainError::not_found("user"));
        }
        let role = self.get_role(role_id).await?;

        self.roles.assign_to_user(user_id, role_id).await?;
        self.publish(Event::role_assigned(user_id, &role.name)).await;
        Ok(())
    }

    /// Removes a role from a user. Idempotent.
    pub async fn remove_role(&self, user_id: Uuid, role_id: Uuid) -> Result<(), DomainError> {
        let role = self.get_role(role_id).await?;

        self.roles.remove_from_user(user_id, role_id).await?;
        self.publish(Event::role_removed(user_id, &role.name)).await;
        Ok(())
    }

    /// Roles held by a user, permissions included
    pub async fn user_roles(&self, user_id: Uuid) -> Result<Vec<Role>, DomainError> {
        self.roles.roles_for_user(user_id).await
    }

    /// Defines a permission.
    ///
    /// # Returns
    /// * `Err(DomainError::Validation)` - Invalid resource or action
    /// * `Err(DomainError::AlreadyExists)` - Pair already defined
    pub async fn create_permission(
        &self,
        resource: &str,
        action: &str,
        description: &str,
    ) -> Result<Permission, DomainError> {
        let permission = Permission::new(resource, action, description)?;
        self.permissions.create(permission).await
    }

    pub async fn get_permission(&self, id: Uuid) -> Result<Permission, DomainError> {
        self.permissions
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("permission"))
    }

    pub async fn list_permissions(&self) -> Result<Vec<Permission>, DomainError> {
        self.permissions.list().await
    }

    /// Deletes a permission.
    ///
    /// # Returns
    /// * `Err(DomainError::Conflict)` - Still granted to at least one role
    pub async fn delete_permission(&self, id: Uuid) -> Result<(), DomainError> {
        self.permissions.delete(id).await
    }

    /// Grants a permission to a role. Idempotent.
    pub async fn add_permission_to_role(
        &self,
        role_id: Uuid,
        permission_id: Uuid,
    ) -> Result<(), DomainError> {
        self.permissions.assign_to_role(role_id, permission_id).await
    }

    /// Removes a grant from a role. Idempotent.
    pub async fn remove_permission_from_role(
        &self,
        role_id: Uuid,
        permission_id: Uuid,
    ) -> Result<(), DomainError> {
        self.permissions
            .remove_from_role(role_id, permission_id)
            .await
    }

    /// Decides from current storage whether a user may perform `action`
    /// on `resource`. Unlike the claims-based check, this sees grant
    /// changes immediately.
    pub async fn check_permission(
        &self,
        user_id: Uuid,
        resource: &str,
        action: &str,
    ) -> Result<bool, DomainError> {
        let roles = self.roles.roles_for_user(user_id).await?;
        Ok(PermissionSet::from_roles(&roles).grants(resource, action))
    }

    async fn publish(&self, event: Event) {
        if let Err(e) = self.events.publish(&event).await {
            warn!(kind = %event.kind, "event publish failed: {}", e);
        }
    }
}
