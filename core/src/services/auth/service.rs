//! Main authentication service implementation

use std::sync::Arc;

use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::domain::entities::role::PermissionSet;
use crate::domain::entities::token::{AccessTokenPayload, Claims, ClientMeta, TokenPair};
use crate::domain::entities::user::User;
use crate::domain::events::Event;
use crate::errors::{DomainError, TokenError};
use crate::repositories::{EventPublisher, RoleRepository, TokenRepository, UserRepository};
use crate::services::password::PasswordService;
use crate::services::token::TokenService;

/// The account fields safe to return alongside a token pair
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub user_type: String,
    pub status: String,
    pub email_verified: bool,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            user_type: user.user_type.as_str().to_string(),
            status: user.status.as_str().to_string(),
            email_verified: user.email_verified,
        }
    }
}

/// Result of a successful login or refresh
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    #[serde(flatten)]
    pub tokens: TokenPair,
    pub user: UserSummary,
}

/// Orchestrates credential checks, token issuance, and session teardown.
///
/// Failures that would reveal whether an account exists, or whether a
/// password rather than a token was wrong, all collapse into
/// [`DomainError::InvalidCredential`]. Only an existing account locked
/// out by status (`inactive` or `suspended`) is reported differently,
/// as [`DomainError::Unauthorized`]. Pending accounts may sign in;
/// verification gates live above this service.
pub struct AuthService<U, T, R, E>
where
    U: UserRepository,
    T: TokenRepository,
    R: RoleRepository,
    E: EventPublisher,
{
    users: Arc<U>,
    tokens: Arc<TokenService<T>>,
    roles: Arc<R>,
    events: Arc<E>,
    passwords: PasswordService,
}

impl<U, T, R, E> AuthService<U, T, R, E>
where
    U: UserRepository,
    T: TokenRepository,
    R: RoleRepository,
    E: EventPublisher,
{
    pub fn new(
        users: Arc<U>,
        tokens: Arc<TokenService<T>>,
        roles: Arc<R>,
        events: Arc<E>,
        passwords: PasswordService,
    ) -> Self {
        Self {
            users,
            tokens,
            roles,
            events,
            passwords,
        }
    }

    /// Authenticates with email and password, returning a token pair.
    ///
    /// # Returns
    /// * `Err(DomainError::InvalidCredential)` - Unknown email, deleted
    ///   account, or wrong password; deliberately indistinguishable
    /// * `Err(DomainError::Unauthorized)` - Credentials are right but the
    ///   account is inactive or suspended
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        client: ClientMeta,
    ) -> Result<AuthResponse, DomainError> {
        let mut user = match self.users.find_by_email(email).await? {
            Some(user) if !user.is_deleted() => user,
            _ => return Err(DomainError::InvalidCredential),
        };

        if !self.passwords.verify(password, &user.password_hash) {
            return Err(DomainError::InvalidCredential);
        }

        if !user.can_authenticate() {
            return Err(DomainError::Unauthorized);
        }

        user.roles = self.roles.roles_for_user(user.id).await?;
        let tokens = self.issue_token_pair(&user, client.clone(), None).await?;

        self.publish(Event::user_logged_in(
            user.id,
            client.ip_address.as_deref(),
            client.user_agent.as_deref(),
        ))
        .await;

        Ok(AuthResponse {
            tokens,
            user: UserSummary::from(&user),
        })
    }

    /// Exchanges a refresh token for a fresh token pair, rotating it.
    ///
    /// The presented token is consumed before the account is inspected;
    /// a refresh attempt against a locked-out account therefore still
    /// burns the token.
    ///
    /// # Returns
    /// * `Err(DomainError::InvalidCredential)` - Unknown token, or the
    ///   owning account is gone
    /// * `Err(DomainError::Token(TokenExpired))` - Token past its expiry
    /// * `Err(DomainError::Token(TokenReused))` - Reuse detected; every
    ///   session for the owner has been revoked
    /// * `Err(DomainError::Unauthorized)` - Account is inactive or suspended
    pub async fn refresh(
        &self,
        refresh_token: &str,
        client: ClientMeta,
    ) -> Result<AuthResponse, DomainError> {
        let consumed = match self.tokens.consume_refresh_token(refresh_token).await {
            Ok(record) => record,
            Err(DomainError::Token(TokenError::InvalidRefreshToken)) => {
                return Err(DomainError::InvalidCredential)
            }
            Err(e) => return Err(e),
        };

        let mut user = match self.users.find_by_id(consumed.user_id).await? {
            Some(user) if !user.is_deleted() => user,
            _ => return Err(DomainError::InvalidCredential),
        };

        if !user.can_authenticate() {
            return Err(DomainError::Unauthorized);
        }

        user.roles = self.roles.roles_for_user(user.id).await?;
        let tokens = self
            .issue_token_pair(&user, client, Some(consumed.id))
            .await?;

        Ok(AuthResponse {
            tokens,
            user: UserSummary::from(&user),
        })
    }

    /// Ends the session behind a refresh token. Idempotent: unknown and
    /// already-revoked tokens succeed without complaint.
    pub async fn logout(&self, refresh_token: &str) -> Result<(), DomainError> {
        if let Some(user_id) = self.tokens.revoke_refresh_token(refresh_token).await? {
            self.publish(Event::user_logged_out(user_id)).await;
        }
        Ok(())
    }

    /// Ends every session for a user.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of sessions revoked
    pub async fn logout_all(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let revoked = self.tokens.revoke_all_user_tokens(user_id).await?;
        if revoked > 0 {
            self.publish(Event::user_logged_out(user_id)).await;
        }
        Ok(revoked)
    }

    /// Verifies an access token and returns its claims
    pub fn validate_token(&self, access_token: &str) -> Result<Claims, DomainError> {
        self.tokens.verify_access_token(access_token)
    }

    /// Decides whether the bearer of `access_token` may perform `action`
    /// on `resource`, from the permission claims embedded in the token.
    /// No storage round trip; revoked roles take effect on next refresh.
    pub fn check_permission(
        &self,
        access_token: &str,
        resource: &str,
        action: &str,
    ) -> Result<bool, DomainError> {
        let claims = self.tokens.verify_access_token(access_token)?;
        let permissions = PermissionSet::from_claims(&claims.permissions);
        Ok(permissions.grants(resource, action))
    }

    async fn issue_token_pair(
        &self,
        user: &User,
        client: ClientMeta,
        predecessor: Option<Uuid>,
    ) -> Result<TokenPair, DomainError> {
        let payload = AccessTokenPayload {
            user_id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            user_type: user.user_type.as_str().to_string(),
            permissions: user.permission_set().to_claims(),
        };

        let access_token = self.tokens.generate_access_token(payload)?;
        let (refresh_token, _) = self
            .tokens
            .issue_refresh_token(user.id, client, predecessor)
            .await?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_in: self.tokens.access_token_expiry_secs(),
        })
    }

    /// Best-effort publish: a broken transport never fails the operation
    async fn publish(&self, event: Event) {
        if let Err(e) = self.events.publish(&event).await {
            warn!(kind = %event.kind, "event publish failed: {}", e);
        }
    }
}
