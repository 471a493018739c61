//! Refresh token repository trait.
//!
//! Only SHA-256 digests of refresh tokens are ever stored; the raw token
//! exists client-side and in transit, nowhere else.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

/// Repository trait for refresh token persistence
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Store a new refresh token record
    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, DomainError>;

    /// Look up a token by the hex digest of its raw value
    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError>;

    /// Conditionally revoke a token.
    ///
    /// The valid-to-revoked transition must be a single atomic compare and
    /// swap against the store, never a read followed by a write.
    ///
    /// # Returns
    /// * `Ok(true)` - This call performed the transition
    /// * `Ok(false)` - The token was already revoked (a concurrent caller
    ///   won the race, or it was revoked earlier)
    /// * `Err(DomainError::NotFound)` - No such token
    async fn revoke(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Record which token superseded `predecessor` during rotation
    async fn link_replacement(
        &self,
        predecessor: Uuid,
        successor: Uuid,
    ) -> Result<(), DomainError>;

    /// Revoke every outstanding token for a user.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of tokens newly revoked
    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<usize, DomainError>;

    /// Delete token records that expired before `cutoff`.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records removed
    async fn delete_expired_before(&self, cutoff: DateTime<Utc>) -> Result<usize, DomainError>;
}
