//! Shared configuration and common types for the Aegis identity service
//!
//! This crate provides functionality used across the server crates:
//! - Configuration types (JWT, authentication)
//! - Error response structure with stable machine-readable codes
//! - Pagination types for list endpoints

pub mod config;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{AuthConfig, JwtConfig};
pub use types::{ErrorResponse, Page, Pagination};
