//! Mock implementation of UserRepository for testing.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use aegis_shared::types::pagination::Page;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

use super::r#trait::{UserFilter, UserRepository};

/// In-memory user repository enforcing the version CAS contract
#[derive(Default)]
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts, for test assertions
    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        let duplicate = users
            .values()
            .any(|u| u.email == user.email || u.username == user.username);
        if duplicate {
            return Err(DomainError::already_exists("user"));
        }

        // Roles are loaded separately, never persisted with the row
        let mut stored = user.clone();
        stored.roles.clear();
        users.insert(stored.id, stored);
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let email = email.trim().to_lowercase();
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        let stored = users
            .get_mut(&user.id)
            .ok_or_else(|| DomainError::not_found("user"))?;

        if stored.version != user.version {
            return Err(DomainError::VersionMismatch);
        }

        let mut committed = user;
        committed.version += 1;
        let mut persisted = committed.clone();
        persisted.roles.clear();
        *stored = persisted;
        Ok(committed)
    }

    async fn soft_delete(&self, id: Uuid) -> Result<(), DomainError> {
        let mut users = self.users.write().await;

        let stored = users
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("user"))?;
        stored.delete();
        stored.version += 1;
        Ok(())
    }

    async fn list(&self, filter: &UserFilter) -> Result<Page<User>, DomainError> {
        let users = self.users.read().await;

        let mut matching: Vec<User> = users
            .values()
            .filter(|u| filter.include_deleted || !u.is_deleted())
            .filter(|u| filter.status.map_or(true, |s| u.status == s))
            .filter(|u| filter.user_type.map_or(true, |t| u.user_type == t))
            .filter(|u| match filter.search.as_deref() {
                Some(needle) => {
                    let needle = needle.to_lowercase();
                    u.email.contains(&needle)
                        || u.username.to_lowercase().contains(&needle)
                        || u.full_name.to_lowercase().contains(&needle)
                }
                None => true,
            })
            .cloned()
            .collect();
        matching.sort_by_key(|u| u.created_at);

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(filter.page.offset as usize)
            .take(filter.page.limit as usize)
            .collect();
        Ok(Page::new(items, total))
    }
}
