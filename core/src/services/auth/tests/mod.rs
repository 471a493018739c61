//! Unit tests for the authentication service


use std::sync::Arc;

use crate::domain::entities::user::{User, UserType};
use crate::repositories::{
    MockEventPublisher, MockRoleRepository, MockTokenRepository, MockUserRepository, RbacStore,
    UserRepository,
};
use crate::services::auth::AuthService;
use crate::services::password::PasswordService;
use crate::services::token::{TokenService, TokenServiceConfig};

pub(crate) const TEST_PASSWORD: &str = "Password123";

pub(crate) struct Harness {
    pub users: Arc<MockUserRepository>,
    pub tokens: Arc<TokenService<MockTokenRepository>>,
    pub roles: Arc<MockRoleRepository>,
    pub rbac: Arc<RbacStore>,
    pub events: Arc<MockEventPublisher>,
    pub auth:
        AuthService<MockUserRepository, MockTokenRepository, MockRoleRepository, MockEventPublisher>,
}

pub(crate) fn harness() -> Harness {
    let users = Arc::new(MockUserRepository::new());
    let rbac = RbacStore::new();
    let roles = Arc::new(MockRoleRepository::new(rbac.clone()));
    let events = Arc::new(MockEventPublisher::new());

    let config = TokenServiceConfig {
        jwt_secret: "unit-test-secret".to_string(),
        access_token_expiry_secs: 900,
        refresh_token_expiry_secs: 604_800,
        issuer: "aegis".to_string(),
        audience: vec!["aegis-api".to_string()],
    };
    let tokens = Arc::new(TokenService::new(MockTokenRepository::new(), config));

    let auth = AuthService::new(
        users.clone(),
        tokens.clone(),
        roles.clone(),
        events.clone(),
        PasswordService::with_cost(4),
    );

    Harness {
        users,
        tokens,
        roles,
        rbac,
        events,
        auth,
    }
}

impl Harness {
    /// Stores an active account whose password is [`TEST_PASSWORD`]
    pub async fn seed_active_user(&self, email: &str, username: &str) -> User {
        let mut user = User::new(email, username, "Test User", UserType::Customer).unwrap();
        user.password_hash = PasswordService::with_cost(4).hash(TEST_PASSWORD).unwrap();
        user.activate().unwrap();
        self.users.create(user).await.unwrap()
    }
}
