//! Role repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::role::Role;
use crate::errors::DomainError;

/// Repository trait for roles and their user assignments.
///
/// Roles returned by lookups carry their full permission list; callers
/// never need a second query to evaluate access.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Store a new role.
    ///
    /// # Returns
    /// * `Err(DomainError::AlreadyExists)` - Role name already taken
    async fn create(&self, role: Role) -> Result<Role, DomainError>;

    /// Find a role by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Role>, DomainError>;

    /// Find a role by its unique name
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, DomainError>;

    /// List all roles
    async fn list(&self) -> Result<Vec<Role>, DomainError>;

    /// Update a role's name and description.
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - No such role
    /// * `Err(DomainError::AlreadyExists)` - New name collides with another role
    async fn update(&self, role: Role) -> Result<Role, DomainError>;

    /// Delete a role.
    ///
    /// # Returns
    /// * `Err(DomainError::Conflict)` - Role is still assigned to users
    /// * `Err(DomainError::NotFound)` - No such role
    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;

    /// Assign a role to a user. Assigning an already-held role is a no-op.
    async fn assign_to_user(&self, user_id: Uuid, role_id: Uuid) -> Result<(), DomainError>;

    /// Remove a role from a user. Removing a role the user does not hold
    /// is a no-op.
    async fn remove_from_user(&self, user_id: Uuid, role_id: Uuid) -> Result<(), DomainError>;

    /// Roles held by a user, permissions included
    async fn roles_for_user(&self, user_id: Uuid) -> Result<Vec<Role>, DomainError>;
}
