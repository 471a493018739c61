//! Unit tests for the user service


use std::sync::Arc;

use crate::domain::entities::user::{User, UserType};
use crate::repositories::{
    MockEventPublisher, MockRoleRepository, MockUserRepository, RbacStore,
};
use crate::services::password::PasswordService;
use crate::services::user::{CreateUserInput, UserService};

pub(crate) const TEST_PASSWORD: &str = "Password123";

pub(crate) struct Harness {
    pub users: Arc<MockUserRepository>,
    pub roles: Arc<MockRoleRepository>,
    pub rbac: Arc<RbacStore>,
    pub events: Arc<MockEventPublisher>,
    pub service: UserService<MockUserRepository, MockRoleRepository, MockEventPublisher>,
}

pub(crate) fn harness() -> Harness {
    let users = Arc::new(MockUserRepository::new());
    let rbac = RbacStore::new();
    let roles = Arc::new(MockRoleRepository::new(rbac.clone()));
    let events = Arc::new(MockEventPublisher::new());

    let service = UserService::new(
        users.clone(),
        roles.clone(),
        events.clone(),
        PasswordService::with_cost(4),
    );

    Harness {
        users,
        roles,
        rbac,
        events,
        service,
    }
}

pub(crate) fn input(email: &str, username: &str) -> CreateUserInput {
    CreateUserInput {
        email: email.to_string(),
        password: TEST_PASSWORD.to_string(),
        username: username.to_string(),
        full_name: "Test User".to_string(),
        user_type: UserType::Customer,
        phone: None,
    }
}

impl Harness {
    pub async fn register_active(&self, email: &str, username: &str) -> User {
        let user = self.service.register(input(email, username)).await.unwrap();
        self.service.activate(user.id).await.unwrap()
    }
}
