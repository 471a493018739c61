//! Main user service implementation

use std::sync::Arc;

use serde_json::Map;
use tracing::warn;
use uuid::Uuid;

use aegis_shared::types::pagination::Page;

use crate::domain::entities::user::{User, UserStatus, UserType};
use crate::domain::events::{
    Event, EVENT_PASSWORD_CHANGED, EVENT_USER_DEACTIVATED, EVENT_USER_EMAIL_VERIFIED,
    EVENT_USER_PHONE_VERIFIED, EVENT_USER_UPDATED,
};
use crate::errors::{DomainError, ValidationError};
use crate::repositories::{EventPublisher, RoleRepository, UserFilter, UserRepository};
use crate::services::password::PasswordService;

/// The name of the role granted to every new account, when it exists
pub const DEFAULT_ROLE: &str = "user";

/// Input for account registration
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    pub email: String,
    pub password: String,
    pub username: String,
    pub full_name: String,
    pub user_type: UserType,
    pub phone: Option<String>,
}

/// Partial profile update; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileInput {
    pub full_name: Option<String>,
    pub username: Option<String>,
    pub phone: Option<String>,
}

/// Handles account-related business operations
pub struct UserService<U, R, E>
where
    U: UserRepository,
    R: RoleRepository,
    E: EventPublisher,
{
    users: Arc<U>,
    roles: Arc<R>,
    events: Arc<E>,
    passwords: PasswordService,
}

impl<U, R, E> UserService<U, R, E>
where
    U: UserRepository,
    R: RoleRepository,
    E: EventPublisher,
{
    pub fn new(users: Arc<U>, roles: Arc<R>, events: Arc<E>, passwords: PasswordService) -> Self {
        Self {
            users,
            roles,
            events,
            passwords,
        }
    }

    /// Registers a new account in `pending` status.
    ///
    /// # Returns
    /// * `Err(DomainError::Validation)` - Invalid fields, weak password,
    ///   or a taken email/username (reported per field)
    pub async fn register(&self, input: CreateUserInput) -> Result<User, DomainError> {
        let password_hash = self.passwords.hash(&input.password)?;

        let mut user = User::new(
            &input.email,
            &input.username,
            &input.full_name,
            input.user_type,
        )?;
        user.password_hash = password_hash;
        if let Some(phone) = &input.phone {
            user.set_phone(phone)?;
        }

        let user = match self.users.create(user).await {
            Ok(user) => user,
            Err(DomainError::AlreadyExists { .. }) => {
                // Be specific about which field collided
                if self.users.find_by_email(&input.email).await?.is_some() {
                    return Err(ValidationError::new("email", "already taken").into());
                }
                return Err(ValidationError::new("username", "already taken").into());
            }
            Err(e) => return Err(e),
        };

        if let Ok(Some(role)) = self.roles.find_by_name(DEFAULT_ROLE).await {
            if let Err(e) = self.roles.assign_to_user(user.id, role.id).await {
                warn!(user_id = %user.id, "default role assignment failed: {}", e);
            }
        }

        self.publish(Event::user_created(&user)).await;
        Ok(user)
    }

    /// Fetches an account with its roles loaded.
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - No such account, or soft-deleted
    pub async fn get(&self, id: Uuid) -> Result<User, DomainError> {
        let mut user = self.fetch(id).await?;
        user.roles = self.roles.roles_for_user(user.id).await?;
        Ok(user)
    }

    /// Fetches an account by email with its roles loaded
    pub async fn get_by_email(&self, email: &str) -> Result<User, DomainError> {
        let mut user = match self.users.find_by_email(email).await? {
            Some(user) if !user.is_deleted() => user,
            _ => return Err(DomainError::not_found("user")),
        };
        user.roles = self.roles.roles_for_user(user.id).await?;
        Ok(user)
    }

    /// Applies a partial profile update.
    ///
    /// The write is conditional on the version read here; a concurrent
    /// change surfaces as [`DomainError::VersionMismatch`] and nothing is
    /// persisted.
    pub async fn update_profile(
        &self,
        id: Uuid,
        input: UpdateProfileInput,
    ) -> Result<User, DomainError> {
        let mut user = self.fetch(id).await?;

        if let Some(full_name) = input.full_name {
            user.full_name = full_name.trim().to_string();
        }
        if let Some(username) = input.username {
            user.username = username.trim().to_string();
        }
        if let Some(phone) = &input.phone {
            user.set_phone(phone)?;
        }
        user.validate()?;

        let user = self.users.update(user).await?;
        self.publish(Event::new(EVENT_USER_UPDATED, user.id, Map::new()))
            .await;
        Ok(user)
    }

    /// Replaces the password after verifying the current one.
    ///
    /// # Returns
    /// * `Err(DomainError::InvalidCredential)` - Current password is wrong
    /// * `Err(DomainError::Validation)` - New password fails the policy
    pub async fn change_password(
        &self,
        id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), DomainError> {
        let mut user = self.fetch(id).await?;

        if !self.passwords.verify(current_password, &user.password_hash) {
            return Err(DomainError::InvalidCredential);
        }

        user.password_hash = self.passwords.hash(new_password)?;
        let user = self.users.update(user).await?;

        self.publish(Event::new(EVENT_PASSWORD_CHANGED, user.id, Map::new()))
            .await;
        Ok(())
    }

    /// Moves an account to `active`.
    ///
    /// # Returns
    /// * `Err(DomainError::InvalidStatusTransition)` - Not reachable from
    ///   the current status
    pub async fn activate(&self, id: Uuid) -> Result<User, DomainError> {
        let user = self.transition(id, UserStatus::Active).await?;
        self.publish(Event::user_activated(&user)).await;
        Ok(user)
    }

    /// Moves an account to `suspended`, recording the reason in the event
    pub async fn suspend(&self, id: Uuid, reason: &str) -> Result<User, DomainError> {
        let user = self.transition(id, UserStatus::Suspended).await?;
        self.publish(Event::user_suspended(&user, reason)).await;
        Ok(user)
    }

    /// Moves an account to `inactive`
    pub async fn deactivate(&self, id: Uuid) -> Result<User, DomainError> {
        let user = self.transition(id, UserStatus::Inactive).await?;
        self.publish(Event::new(EVENT_USER_DEACTIVATED, user.id, Map::new()))
            .await;
        Ok(user)
    }

    /// Soft-deletes an account
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.users.soft_delete(id).await?;
        self.publish(Event::user_deleted(id)).await;
        Ok(())
    }

    /// Lists accounts with filtering and pagination
    pub async fn list(&self, filter: &UserFilter) -> Result<Page<User>, DomainError> {
        self.users.list(filter).await
    }

    /// Marks the account's email address verified
    pub async fn verify_email(&self, id: Uuid) -> Result<(), DomainError> {
        let mut user = self.fetch(id).await?;
        user.verify_email();
        let user = self.users.update(user).await?;

        self.publish(Event::new(EVENT_USER_EMAIL_VERIFIED, user.id, Map::new()))
            .await;
        Ok(())
    }

    /// Marks the account's phone number verified
    pub async fn verify_phone(&self, id: Uuid) -> Result<(), DomainError> {
        let mut user = self.fetch(id).await?;
        user.verify_phone();
        let user = self.users.update(user).await?;

        self.publish(Event::new(EVENT_USER_PHONE_VERIFIED, user.id, Map::new()))
            .await;
        Ok(())
    }

    async fn fetch(&self, id: Uuid) -> Result<User, DomainError> {
        match self.users.find_by_id(id).await? {
            Some(user) if !user.is_deleted() => Ok(user),
            _ => Err(DomainError::not_found("user")),
        }
    }

    async fn transition(&self, id: Uuid, target: UserStatus) -> Result<User, DomainError> {
        let mut user = self.fetch(id).await?;
        user.change_status(target)?;
        self.users.update(user).await
    }

    async fn publish(&self, event: Event) {
        if let Err(e) = self.events.publish(&event).await {
            warn!(kind = %event.kind, "event publish failed: {}", e);
        }
    }
}
