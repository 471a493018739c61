//! Unit tests for the RBAC service


use std::sync::Arc;

use crate::domain::entities::user::{User, UserType};
use crate::repositories::{
    MockEventPublisher, MockPermissionRepository, MockRoleRepository, MockUserRepository,
    RbacStore, UserRepository,
};
use crate::services::rbac::RbacService;

pub(crate) struct Harness {
    pub users: Arc<MockUserRepository>,
    pub events: Arc<MockEventPublisher>,
    pub service: RbacService<
        MockUserRepository,
        MockRoleRepository,
        MockPermissionRepository,
        MockEventPublisher,
    >,
}

pub(crate) fn harness() -> Harness {
    let users = Arc::new(MockUserRepository::new());
    let rbac = RbacStore::new();
    let roles = Arc::new(MockRoleRepository::new(rbac.clone()));
    let permissions = Arc::new(MockPermissionRepository::new(rbac));
    let events = Arc::new(MockEventPublisher::new());

    let service = RbacService::new(users.clone(), roles, permissions, events.clone());

    Harness {
        users,
        events,
        service,
    }
}

impl Harness {
    pub async fn seed_user(&self, email: &str, username: &str) -> User {
        let user = User::new(email, username, "Test User", UserType::Customer).unwrap();
        self.users.create(user).await.unwrap()
    }
}
