//! Authentication orchestration: login, token refresh, logout, and
//! access checks against token claims.

mod service;

#[cfg(test)]
mod tests;

pub use service::{AuthResponse, AuthService, UserSummary};
