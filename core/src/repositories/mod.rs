//! Repository traits consumed by the services, plus in-memory mocks.
//!
//! Any durable store satisfying these contracts suffices; implementations
//! translate their engine-specific failures into [`DomainError`] before
//! returning. The mocks back the service tests.
//!
//! [`DomainError`]: crate::errors::DomainError

pub mod events;
pub mod permission;
pub mod role;
pub mod token;
pub mod user;

pub use events::{EventPublisher, LoggingEventPublisher, NoopEventPublisher};
pub use permission::PermissionRepository;
pub use role::RoleRepository;
pub use token::TokenRepository;
pub use user::{UserFilter, UserRepository};

#[cfg(test)]
pub use events::MockEventPublisher;
#[cfg(test)]
pub use permission::MockPermissionRepository;
#[cfg(test)]
pub use role::{MockRoleRepository, RbacStore};
#[cfg(test)]
pub use token::MockTokenRepository;
#[cfg(test)]
pub use user::MockUserRepository;
