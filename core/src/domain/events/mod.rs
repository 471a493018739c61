//! Domain events: immutable facts about something that happened.
//!
//! Events are published best-effort through the [`EventPublisher`]
//! contract; a failed publish never fails the operation that produced it.
//!
//! [`EventPublisher`]: crate::repositories::EventPublisher

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::entities::user::User;

/// Event kind constants
pub const EVENT_USER_CREATED: &str = "user.created";
pub const EVENT_USER_UPDATED: &str = "user.updated";
pub const EVENT_USER_DELETED: &str = "user.deleted";
pub const EVENT_USER_ACTIVATED: &str = "user.activated";
pub const EVENT_USER_SUSPENDED: &str = "user.suspended";
pub const EVENT_USER_DEACTIVATED: &str = "user.deactivated";
pub const EVENT_USER_EMAIL_VERIFIED: &str = "user.email_verified";
pub const EVENT_USER_PHONE_VERIFIED: &str = "user.phone_verified";
pub const EVENT_USER_LOGGED_IN: &str = "user.logged_in";
pub const EVENT_USER_LOGGED_OUT: &str = "user.logged_out";
pub const EVENT_USER_ROLE_ASSIGNED: &str = "user.role_assigned";
pub const EVENT_USER_ROLE_REMOVED: &str = "user.role_removed";
pub const EVENT_PASSWORD_CHANGED: &str = "user.password_changed";

/// A domain event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub kind: String,
    pub timestamp: DateTime<Utc>,
    pub user_id: Uuid,
    pub data: Map<String, Value>,
}

impl Event {
    pub fn new(kind: &str, user_id: Uuid, data: Map<String, Value>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: kind.to_string(),
            timestamp: Utc::now(),
            user_id,
            data,
        }
    }

    pub fn user_created(user: &User) -> Self {
        let mut data = Map::new();
        data.insert("email".into(), user.email.clone().into());
        data.insert("username".into(), user.username.clone().into());
        data.insert("user_type".into(), user.user_type.as_str().into());
        Self::new(EVENT_USER_CREATED, user.id, data)
    }

    pub fn user_activated(user: &User) -> Self {
        let mut data = Map::new();
        data.insert("email".into(), user.email.clone().into());
        data.insert("username".into(), user.username.clone().into());
        Self::new(EVENT_USER_ACTIVATED, user.id, data)
    }

    pub fn user_suspended(user: &User, reason: &str) -> Self {
        let mut data = Map::new();
        data.insert("email".into(), user.email.clone().into());
        data.insert("username".into(), user.username.clone().into());
        data.insert("reason".into(), reason.into());
        Self::new(EVENT_USER_SUSPENDED, user.id, data)
    }

    pub fn user_deleted(user_id: Uuid) -> Self {
        Self::new(EVENT_USER_DELETED, user_id, Map::new())
    }

    pub fn user_logged_in(user_id: Uuid, client_ip: Option<&str>, user_agent: Option<&str>) -> Self {
        let mut data = Map::new();
        if let Some(ip) = client_ip {
            data.insert("ip_address".into(), ip.into());
        }
        if let Some(agent) = user_agent {
            data.insert("user_agent".into(), agent.into());
        }
        Self::new(EVENT_USER_LOGGED_IN, user_id, data)
    }

    pub fn user_logged_out(user_id: Uuid) -> Self {
        Self::new(EVENT_USER_LOGGED_OUT, user_id, Map::new())
    }

    pub fn role_assigned(user_id: Uuid, role_name: &str) -> Self {
        let mut data = Map::new();
        data.insert("role".into(), role_name.into());
        Self::new(EVENT_USER_ROLE_ASSIGNED, user_id, data)
    }

    pub fn role_removed(user_id: Uuid, role_name: &str) -> Self {
        let mut data = Map::new();
        data.insert("role".into(), role_name.into());
        Self::new(EVENT_USER_ROLE_REMOVED, user_id, data)
    }
}
