//! User repository trait defining the interface for account persistence.

use async_trait::async_trait;
use uuid::Uuid;

use aegis_shared::types::pagination::{Page, Pagination};

use crate::domain::entities::user::{User, UserStatus, UserType};
use crate::errors::DomainError;

/// Filtering and pagination options for listing accounts
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub status: Option<UserStatus>,
    pub user_type: Option<UserType>,
    /// Matches against email, username, and full name
    pub search: Option<String>,
    /// Include soft-deleted accounts
    pub include_deleted: bool,
    pub page: Pagination,
}

/// Repository trait for account persistence.
///
/// Every mutation is a conditional write on the account `version`: the
/// store commits only when the persisted version matches the snapshot the
/// caller read, atomically advancing it by one. A plain read-then-write is
/// not an acceptable implementation.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new account.
    ///
    /// # Returns
    /// * `Ok(User)` - The persisted account
    /// * `Err(DomainError::AlreadyExists)` - Email or username already taken
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Find an account by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find an account by normalized email (case-insensitive)
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find an account by username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Conditionally update an account by version.
    ///
    /// # Returns
    /// * `Ok(User)` - The committed copy, version advanced by exactly one
    /// * `Err(DomainError::VersionMismatch)` - The record exists but was
    ///   modified since this snapshot was read; no side effects occurred
    /// * `Err(DomainError::NotFound)` - The record no longer exists
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Soft-delete an account.
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - No such account
    async fn soft_delete(&self, id: Uuid) -> Result<(), DomainError>;

    /// List accounts with filtering and pagination
    async fn list(&self, filter: &UserFilter) -> Result<Page<User>, DomainError>;
}
