//! Permission repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::role::Permission;
use crate::errors::DomainError;

/// Repository trait for the permission catalog and role grants
#[async_trait]
pub trait PermissionRepository: Send + Sync {
    /// Store a new permission.
    ///
    /// # Returns
    /// * `Err(DomainError::AlreadyExists)` - The (resource, action) pair
    ///   is already defined
    async fn create(&self, permission: Permission) -> Result<Permission, DomainError>;

    /// Find a permission by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Permission>, DomainError>;

    /// List all defined permissions
    async fn list(&self) -> Result<Vec<Permission>, DomainError>;

    /// Delete a permission.
    ///
    /// # Returns
    /// * `Err(DomainError::Conflict)` - Still granted to at least one role
    /// * `Err(DomainError::NotFound)` - No such permission
    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;

    /// Grant a permission to a role. Granting twice is a no-op.
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - Role or permission does not exist
    async fn assign_to_role(&self, role_id: Uuid, permission_id: Uuid) -> Result<(), DomainError>;

    /// Remove a grant from a role. Removing an absent grant is a no-op.
    async fn remove_from_role(&self, role_id: Uuid, permission_id: Uuid)
        -> Result<(), DomainError>;
}
