//! Domain-specific error types and error handling.
//!
//! Storage implementations translate engine-level failures (constraint
//! violations, connection errors) into this taxonomy at the storage
//! boundary; the services in this crate never inspect storage-specific
//! error codes.

mod types;

pub use types::{TokenError, ValidationError, ValidationErrors};

use aegis_shared::types::response::ErrorResponse;
use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    /// Unknown principal or wrong password. Deliberately indistinguishable
    /// so callers cannot enumerate accounts.
    #[error("invalid credentials")]
    InvalidCredential,

    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,

    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("{resource} already exists")]
    AlreadyExists { resource: String },

    #[error("conflict: {message}")]
    Conflict { message: String },

    /// The record was modified since this snapshot was read
    #[error("version mismatch")]
    VersionMismatch,

    #[error("invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("internal error: {message}")]
    Internal { message: String },
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn already_exists(resource: impl Into<String>) -> Self {
        Self::AlreadyExists {
            resource: resource.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Stable machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::InvalidCredential => "INVALID_CREDENTIALS",
            DomainError::Unauthorized => "UNAUTHORIZED",
            DomainError::Forbidden => "FORBIDDEN",
            DomainError::NotFound { .. } => "NOT_FOUND",
            DomainError::AlreadyExists { .. } => "ALREADY_EXISTS",
            DomainError::Conflict { .. } => "CONFLICT",
            DomainError::VersionMismatch => "VERSION_MISMATCH",
            DomainError::InvalidStatusTransition { .. } => "INVALID_STATUS_TRANSITION",
            DomainError::Validation(_) => "VALIDATION_ERROR",
            DomainError::Token(token) => token.code(),
            DomainError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<ValidationError> for DomainError {
    fn from(error: ValidationError) -> Self {
        DomainError::Validation(error.into())
    }
}

/// Convert a domain error into the wire-level error response.
///
/// Internal errors are collapsed to a generic message; the detail stays in
/// server-side logs. Validation failures attach one detail entry per field.
impl From<&DomainError> for ErrorResponse {
    fn from(err: &DomainError) -> Self {
        match err {
            DomainError::Internal { .. } => {
                ErrorResponse::new(err.code(), "internal error")
            }
            DomainError::Validation(errors) => {
                let mut response = ErrorResponse::new(err.code(), err.to_string());
                for error in errors.iter() {
                    response = response
                        .with_detail(error.field.clone(), serde_json::json!(error.message));
                }
                response
            }
            _ => ErrorResponse::new(err.code(), err.to_string()),
        }
    }
}
