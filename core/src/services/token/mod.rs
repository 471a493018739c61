//! Token service module for JWT and refresh token management
//!
//! This module handles all token-related operations including:
//! - JWT access token generation and verification
//! - Refresh token issuance, rotation, and reuse detection
//! - Token revocation
//! - Background cleanup of expired token records

mod cleanup;
mod config;
mod service;

#[cfg(test)]
mod tests;

pub use cleanup::{CleanupResult, TokenCleanupConfig, TokenCleanupService};
pub use config::TokenServiceConfig;
pub use service::TokenService;
