//! Mock implementation of TokenRepository for testing.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

use super::r#trait::TokenRepository;

/// In-memory refresh token store
#[derive(Default)]
pub struct MockTokenRepository {
    tokens: Arc<RwLock<HashMap<Uuid, RefreshToken>>>,
}

impl MockTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, revoked included
    pub async fn count(&self) -> usize {
        self.tokens.read().await.len()
    }

    /// Number of tokens for `user_id` that are neither revoked nor expired
    pub async fn valid_count_for_user(&self, user_id: Uuid) -> usize {
        let tokens = self.tokens.read().await;
        tokens
            .values()
            .filter(|t| t.user_id == user_id && t.is_valid())
            .count()
    }

    pub async fn get(&self, id: Uuid) -> Option<RefreshToken> {
        self.tokens.read().await.get(&id).cloned()
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        let mut tokens = self.tokens.write().await;
        tokens.insert(token.id, token.clone());
        Ok(token)
    }

    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.values().find(|t| t.token_hash == token_hash).cloned())
    }

    async fn revoke(&self, id: Uuid) -> Result<bool, DomainError> {
        // The write lock is held across check and set, so the transition
        // is atomic with respect to other callers.
        let mut tokens = self.tokens.write().await;

        let token = tokens
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("refresh token"))?;
        if token.is_revoked() {
            return Ok(false);
        }
        token.revoke();
        Ok(true)
    }

    async fn link_replacement(
        &self,
        predecessor: Uuid,
        successor: Uuid,
    ) -> Result<(), DomainError> {
        let mut tokens = self.tokens.write().await;

        let token = tokens
            .get_mut(&predecessor)
            .ok_or_else(|| DomainError::not_found("refresh token"))?;
        token.replaced_by = Some(successor);
        Ok(())
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let mut tokens = self.tokens.write().await;

        let mut revoked = 0;
        for token in tokens.values_mut() {
            if token.user_id == user_id && !token.is_revoked() {
                token.revoke();
                revoked += 1;
            }
        }
        Ok(revoked)
    }

    async fn delete_expired_before(&self, cutoff: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut tokens = self.tokens.write().await;

        let before = tokens.len();
        tokens.retain(|_, t| t.expires_at >= cutoff);
        Ok(before - tokens.len())
    }
}
