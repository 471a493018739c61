//! User entity representing an account in the Aegis identity service.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::role::{PermissionSet, Role};
use crate::errors::{ValidationError, ValidationErrors};

/// Represents the type/category of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// Administrative account
    Admin,
    /// Regular customer account
    Customer,
    /// Partner/integration account
    Partner,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Admin => "admin",
            UserType::Customer => "customer",
            UserType::Partner => "partner",
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current state of an account
///
/// Transitions follow a fixed directed graph:
///
/// ```text
/// pending   -> active, inactive
/// active    -> inactive, suspended
/// inactive  -> active, suspended
/// suspended -> active, inactive
/// ```
///
/// There is no terminal state; `suspended` and `inactive` are recoverable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Pending,
    Active,
    Inactive,
    Suspended,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Pending => "pending",
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
            UserStatus::Suspended => "suspended",
        }
    }

    /// Whether `target` is reachable from this status in one step
    pub fn can_transition_to(&self, target: UserStatus) -> bool {
        use UserStatus::*;
        matches!(
            (self, target),
            (Pending, Active)
                | (Pending, Inactive)
                | (Active, Inactive)
                | (Active, Suspended)
                | (Inactive, Active)
                | (Inactive, Suspended)
                | (Suspended, Active)
                | (Suspended, Inactive)
        )
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User entity representing a registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the account
    pub id: Uuid,

    /// Normalized (trimmed, lower-cased) email; unique case-insensitively
    pub email: String,

    /// Unique username, 3-50 characters of `[A-Za-z0-9_-]`
    pub username: String,

    /// Password hash; never expose externally. The raw password is hashed
    /// by the password service before it reaches this entity.
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Display name
    pub full_name: String,

    /// Optional phone number
    pub phone: Option<String>,

    /// Account type
    pub user_type: UserType,

    /// Account status
    pub status: UserStatus,

    /// Whether the email address has been verified
    pub email_verified: bool,

    /// Whether the phone number has been verified
    pub phone_verified: bool,

    /// Monotonically increasing version for optimistic locking. The store
    /// advances it by exactly one on every committed mutation.
    pub version: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Soft-delete timestamp
    pub deleted_at: Option<DateTime<Utc>>,

    /// Roles assigned to this account (loaded separately, never persisted
    /// as part of the account row)
    #[serde(default)]
    pub roles: Vec<Role>,
}

impl User {
    /// Creates a new account in `pending` status at version 1.
    ///
    /// All field failures are collected; the error reports every invalid
    /// field at once.
    pub fn new(
        email: &str,
        username: &str,
        full_name: &str,
        user_type: UserType,
    ) -> Result<Self, ValidationErrors> {
        let now = Utc::now();
        let user = Self {
            id: Uuid::new_v4(),
            email: email.trim().to_lowercase(),
            username: username.trim().to_string(),
            password_hash: String::new(),
            full_name: full_name.trim().to_string(),
            phone: None,
            user_type,
            status: UserStatus::Pending,
            email_verified: false,
            phone_verified: false,
            version: 1,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            roles: Vec::new(),
        };

        user.validate()?;
        Ok(user)
    }

    /// Validates the entity, collecting every field failure.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.email.is_empty() {
            errors.add("email", "required");
        } else if !is_valid_email(&self.email) {
            errors.add("email", "invalid format");
        }

        if self.username.is_empty() {
            errors.add("username", "required");
        } else if self.username.len() < 3 || self.username.len() > 50 {
            errors.add("username", "must be 3-50 characters");
        } else if !is_valid_username(&self.username) {
            errors.add(
                "username",
                "can only contain letters, numbers, underscores, and hyphens",
            );
        }

        if self.full_name.is_empty() {
            errors.add("full_name", "required");
        } else if self.full_name.len() > 200 {
            errors.add("full_name", "must be at most 200 characters");
        }

        if let Some(phone) = self.phone.as_deref() {
            if !phone.is_empty() && !is_valid_phone(phone) {
                errors.add("phone", "invalid phone format");
            }
        }

        errors.into_result()
    }

    /// Sets or clears the phone number; clears the verification flag either way.
    pub fn set_phone(&mut self, phone: &str) -> Result<(), ValidationError> {
        let phone = phone.trim();
        if phone.is_empty() {
            self.phone = None;
            self.phone_verified = false;
            return Ok(());
        }
        if !is_valid_phone(phone) {
            return Err(ValidationError::new("phone", "invalid phone format"));
        }
        self.phone = Some(phone.to_string());
        self.phone_verified = false;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Moves the account to `target` status.
    ///
    /// Requesting the current status is a successful no-op. A transition
    /// outside the table fails naming both states.
    pub fn change_status(&mut self, target: UserStatus) -> Result<(), crate::errors::DomainError> {
        if self.status == target {
            return Ok(());
        }
        if !self.status.can_transition_to(target) {
            return Err(crate::errors::DomainError::InvalidStatusTransition {
                from: self.status.to_string(),
                to: target.to_string(),
            });
        }
        self.status = target;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Idempotent convenience for `change_status(Active)`
    pub fn activate(&mut self) -> Result<(), crate::errors::DomainError> {
        self.change_status(UserStatus::Active)
    }

    /// Idempotent convenience for `change_status(Suspended)`
    pub fn suspend(&mut self) -> Result<(), crate::errors::DomainError> {
        self.change_status(UserStatus::Suspended)
    }

    pub fn verify_email(&mut self) {
        self.email_verified = true;
        self.updated_at = Utc::now();
    }

    pub fn verify_phone(&mut self) {
        self.phone_verified = true;
        self.updated_at = Utc::now();
    }

    /// Active and not soft-deleted
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active && self.deleted_at.is_none()
    }

    /// Whether this account may hold a session. Pending accounts can sign
    /// in before completing verification; only `inactive` and `suspended`
    /// are locked out.
    pub fn can_authenticate(&self) -> bool {
        matches!(self.status, UserStatus::Pending | UserStatus::Active)
            && self.deleted_at.is_none()
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Marks the account soft-deleted
    pub fn delete(&mut self) {
        let now = Utc::now();
        self.deleted_at = Some(now);
        self.updated_at = now;
    }

    pub fn has_role(&self, role_name: &str) -> bool {
        self.roles.iter().any(|r| r.name == role_name)
    }

    /// Flattened, deduplicated permissions across all assigned roles
    pub fn permission_set(&self) -> PermissionSet {
        PermissionSet::from_roles(&self.roles)
    }

    pub fn has_permission(&self, resource: &str, action: &str) -> bool {
        self.permission_set().grants(resource, action)
    }
}

static USERNAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap());

fn is_valid_username(s: &str) -> bool {
    USERNAME_REGEX.is_match(s)
}

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

fn is_valid_email(s: &str) -> bool {
    EMAIL_REGEX.is_match(s)
}

static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[\d\s\-()]+$").unwrap());

fn is_valid_phone(s: &str) -> bool {
    // At least 7 digits
    let digit_count = s.chars().filter(|c| c.is_ascii_digit()).count();
    PHONE_REGEX.is_match(s) && digit_count >= 7
}
