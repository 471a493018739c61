//! Configuration types shared across server crates
//!
//! Transport and storage configuration live with their own crates; what is
//! shared here is the authentication configuration the token issuer consumes.

pub mod auth;

pub use auth::{AuthConfig, JwtConfig};
