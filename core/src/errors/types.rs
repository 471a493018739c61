//! Token and validation error types
//!
//! These errors carry the structured payloads the transport layer needs to
//! build stable machine-readable responses. Messages here are for operators
//! and logs; user-facing wording belongs to the presentation layer.

use std::fmt;

use thiserror::Error;

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    TokenExpired,

    #[error("token not yet valid")]
    TokenNotYetValid,

    #[error("invalid token format")]
    InvalidTokenFormat,

    #[error("token signature verification failed")]
    InvalidSignature,

    #[error("token revoked")]
    TokenRevoked,

    #[error("refresh token reuse detected")]
    TokenReused,

    #[error("invalid refresh token")]
    InvalidRefreshToken,

    #[error("token generation failed")]
    TokenGenerationFailed,
}

impl TokenError {
    /// Stable machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::TokenExpired => "TOKEN_EXPIRED",
            TokenError::TokenNotYetValid => "TOKEN_NOT_YET_VALID",
            TokenError::InvalidTokenFormat => "INVALID_TOKEN_FORMAT",
            TokenError::InvalidSignature => "INVALID_SIGNATURE",
            TokenError::TokenRevoked => "TOKEN_REVOKED",
            TokenError::TokenReused => "TOKEN_REUSED",
            TokenError::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",
            TokenError::TokenGenerationFailed => "TOKEN_GENERATION_FAILED",
        }
    }
}

/// A single field-level validation failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("validation error on {field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A collection of validation failures
///
/// Validation does not short-circuit on the first invalid field; every
/// failure is collected so one response can report them all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(ValidationError::new(field, message));
    }

    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Ok when no failure was collected, Err with the collection otherwise
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [single] => write!(f, "{}", single),
            errors => write!(f, "{} validation errors", errors.len()),
        }
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self(vec![error])
    }
}
