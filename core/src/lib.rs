//! # Aegis Core
//!
//! Core business logic and domain layer for the Aegis identity service.
//! This crate contains the domain entities, authentication and RBAC
//! services, repository interfaces, and error types. Transport adapters and
//! concrete storage implementations live in their own crates and consume
//! this one through the repository traits.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
