//! Account lifecycle: registration, profile updates, status changes,
//! and credential maintenance.

mod service;

#[cfg(test)]
mod tests;

pub use service::{CreateUserInput, UpdateProfileInput, UserService};
