//! Password hashing and strength policy.
//!
//! Hashes are bcrypt; verification is constant-time inside the bcrypt
//! implementation. The strength policy is deliberately small: length
//! bounds plus three character classes.

use crate::errors::{DomainError, ValidationErrors};

/// bcrypt work factor. Takes tens of milliseconds per hash on current
/// hardware, which is the point.
pub const BCRYPT_COST: u32 = 12;

/// Passwords beyond 72 bytes are silently truncated by bcrypt, so they
/// are rejected up front instead.
pub const MAX_PASSWORD_BYTES: usize = 72;

pub const MIN_PASSWORD_CHARS: usize = 8;

/// Service for hashing, verifying, and vetting passwords
#[derive(Debug, Clone)]
pub struct PasswordService {
    cost: u32,
}

impl Default for PasswordService {
    fn default() -> Self {
        Self { cost: BCRYPT_COST }
    }
}

impl PasswordService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lower work factor for tests; never use in production
    #[cfg(test)]
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    /// Validates strength, then hashes.
    ///
    /// # Returns
    /// * `Ok(String)` - The bcrypt hash
    /// * `Err(DomainError::Validation)` - Password fails the strength policy
    pub fn hash(&self, password: &str) -> Result<String, DomainError> {
        self.validate_strength(password)?;
        bcrypt::hash(password, self.cost)
            .map_err(|e| DomainError::internal(format!("password hashing failed: {e}")))
    }

    /// Checks a candidate password against a stored hash.
    ///
    /// An unparseable hash verifies as `false` rather than erroring, so a
    /// corrupted row reads as a failed login instead of a 500.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        bcrypt::verify(password, hash).unwrap_or(false)
    }

    /// Applies the strength policy, collecting every failure
    pub fn validate_strength(&self, password: &str) -> Result<(), DomainError> {
        let mut errors = ValidationErrors::new();

        if password.chars().count() < MIN_PASSWORD_CHARS {
            errors.add("password", "must be at least 8 characters");
        }
        if password.len() > MAX_PASSWORD_BYTES {
            errors.add("password", "must be at most 72 bytes");
        }
        if !password.chars().any(|c| c.is_ascii_uppercase()) {
            errors.add("password", "must contain an uppercase letter");
        }
        if !password.chars().any(|c| c.is_ascii_lowercase()) {
            errors.add("password", "must contain a lowercase letter");
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            errors.add("password", "must contain a digit");
        }

        errors.into_result().map_err(DomainError::from)
    }
}
