//! Domain entities for accounts, roles, permissions, and tokens.

pub mod role;
pub mod token;
pub mod user;

pub use role::{Permission, PermissionSet, Role};
pub use token::{AccessTokenPayload, Claims, ClientMeta, RefreshToken, TokenPair};
pub use user::{User, UserStatus, UserType};
