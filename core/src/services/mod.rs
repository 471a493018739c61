//! Application services orchestrating entities, repositories, and policy.


pub mod auth;
pub mod password;
pub mod rbac;
pub mod token;
pub mod user;

pub use auth::AuthService;
pub use password::PasswordService;
pub use rbac::RbacService;
pub use token::{TokenCleanupConfig, TokenCleanupService, TokenService, TokenServiceConfig};
pub use user::UserService;
