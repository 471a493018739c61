//! Role and permission entities for the resource/action grant model.
//!
//! A permission is a `(resource, action)` pair; either field may be the
//! wildcard `*`, and `(*, *)` denotes unrestricted access. Matching is a
//! closed enumeration of four rules evaluated over the two-field struct,
//! never over concatenated strings, so a grant cannot be forged or broken
//! by formatting.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ValidationErrors;

/// The literal wildcard token for resource or action
pub const WILDCARD: &str = "*";

/// An atomic grant expressed as a (resource, action) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub id: Uuid,

    /// Normalized (trimmed, lower-cased) resource name, e.g. "users"
    pub resource: String,

    /// Normalized action name, e.g. "read", "write", "delete"
    pub action: String,

    pub description: String,

    pub created_at: DateTime<Utc>,
}

impl Permission {
    /// Creates a validated permission. Resource and action are trimmed and
    /// lower-cased; each must be `*` or 1-50 characters of `[a-z0-9_-]`.
    /// A colon can never appear in either field, which keeps the flattened
    /// `resource:action` claim form unambiguous.
    pub fn new(
        resource: &str,
        action: &str,
        description: &str,
    ) -> Result<Self, ValidationErrors> {
        let permission = Self {
            id: Uuid::new_v4(),
            resource: resource.trim().to_lowercase(),
            action: action.trim().to_lowercase(),
            description: description.trim().to_string(),
            created_at: Utc::now(),
        };

        permission.validate()?;
        Ok(permission)
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.resource.is_empty() {
            errors.add("resource", "required");
        } else if !is_valid_field(&self.resource) {
            errors.add(
                "resource",
                "must be '*' or 1-50 characters of lowercase letters, digits, '_', '-'",
            );
        }

        if self.action.is_empty() {
            errors.add("action", "required");
        } else if !is_valid_field(&self.action) {
            errors.add(
                "action",
                "must be '*' or 1-50 characters of lowercase letters, digits, '_', '-'",
            );
        }

        errors.into_result()
    }

    /// Whether this permission covers the requested pair.
    ///
    /// True for any of: exact `(resource, action)`, `(resource, *)`,
    /// `(*, action)`, `(*, *)`.
    pub fn matches(&self, resource: &str, action: &str) -> bool {
        (self.resource == resource || self.resource == WILDCARD)
            && (self.action == action || self.action == WILDCARD)
    }

    /// Flattened `resource:action` form used in access-token claims
    pub fn as_claim(&self) -> String {
        format!("{}:{}", self.resource, self.action)
    }
}

static FIELD_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\*|[a-z0-9_-]{1,50})$").unwrap());

fn is_valid_field(s: &str) -> bool {
    FIELD_REGEX.is_match(s)
}

/// A named collection of permissions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: Uuid,

    /// Normalized (trimmed, lower-cased) unique role name
    pub name: String,

    pub description: String,

    #[serde(default)]
    pub permissions: Vec<Permission>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Role {
    /// Creates a validated role with no permissions.
    pub fn new(name: &str, description: &str) -> Result<Self, ValidationErrors> {
        let now = Utc::now();
        let role = Self {
            id: Uuid::new_v4(),
            name: name.trim().to_lowercase(),
            description: description.trim().to_string(),
            permissions: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        role.validate()?;
        Ok(role)
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.name.is_empty() {
            errors.add("name", "required");
        } else if self.name.len() > 50 {
            errors.add("name", "must be at most 50 characters");
        }

        errors.into_result()
    }

    /// Whether any permission of this role covers the requested pair
    pub fn grants(&self, resource: &str, action: &str) -> bool {
        self.permissions.iter().any(|p| p.matches(resource, action))
    }

    /// Adds a permission if not already present (idempotent by id)
    pub fn add_permission(&mut self, permission: Permission) {
        if self.permissions.iter().any(|p| p.id == permission.id) {
            return;
        }
        self.permissions.push(permission);
        self.updated_at = Utc::now();
    }

    /// Removes a permission by id; absent id is a no-op
    pub fn remove_permission(&mut self, permission_id: Uuid) {
        let before = self.permissions.len();
        self.permissions.retain(|p| p.id != permission_id);
        if self.permissions.len() != before {
            self.updated_at = Utc::now();
        }
    }

    /// All permissions as `resource:action` claim strings
    pub fn permission_claims(&self) -> Vec<String> {
        self.permissions.iter().map(Permission::as_claim).collect()
    }
}

/// Flattened, deduplicated set of (resource, action) grants.
///
/// This is what the access-control layer evaluates on every privileged
/// request: total, side-effect free, O(number of entries held).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet {
    entries: Vec<(String, String)>,
}

impl PermissionSet {
    /// Flattens all permissions across roles, deduplicated by pair
    pub fn from_roles(roles: &[Role]) -> Self {
        let mut set = Self::default();
        for role in roles {
            for permission in &role.permissions {
                set.insert(&permission.resource, &permission.action);
            }
        }
        set
    }

    /// Rebuilds a set from `resource:action` claim strings.
    ///
    /// Entries without exactly one separating colon are ignored; permission
    /// fields can never contain a colon, so a well-formed claim splits
    /// unambiguously.
    pub fn from_claims<I, S>(claims: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for claim in claims {
            if let Some((resource, action)) = claim.as_ref().split_once(':') {
                if !resource.is_empty() && !action.is_empty() && !action.contains(':') {
                    set.insert(resource, action);
                }
            }
        }
        set
    }

    fn insert(&mut self, resource: &str, action: &str) {
        let entry = (resource.to_string(), action.to_string());
        if !self.entries.contains(&entry) {
            self.entries.push(entry);
        }
    }

    /// Whether the set grants the requested (resource, action) pair.
    ///
    /// The request is normalized the same way permissions are stored. Any
    /// one matching entry is sufficient; evaluation order is irrelevant.
    pub fn grants(&self, resource: &str, action: &str) -> bool {
        let resource = resource.trim().to_lowercase();
        let action = action.trim().to_lowercase();
        self.entries.iter().any(|(r, a)| {
            (r == &resource || r == WILDCARD) && (a == &action || a == WILDCARD)
        })
    }

    /// Renders the set as claim strings for token issuance
    pub fn to_claims(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(r, a)| format!("{r}:{a}"))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
