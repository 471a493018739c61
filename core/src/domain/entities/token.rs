//! Token entities: JWT access claims and stored refresh-token records.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The identity information embedded into an access token at issuance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessTokenPayload {
    pub user_id: Uuid,
    pub email: String,
    pub username: String,
    pub user_type: String,
    /// Flattened `resource:action` permission strings
    pub permissions: Vec<String>,
}

/// Claims structure for the JWT payload.
///
/// Ephemeral: derived fresh from the account's current roles on every
/// issuance, never loaded back from storage. Role changes therefore take
/// effect on the next token, not retroactively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account id)
    pub sub: String,

    pub email: String,

    pub username: String,

    pub user_type: String,

    /// Flattened `resource:action` permission strings
    #[serde(default)]
    pub permissions: Vec<String>,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// JWT ID, fresh and random per issuance
    pub jti: String,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: Vec<String>,
}

impl Claims {
    /// Creates access-token claims: `iat = nbf = now`, `exp = now + ttl`,
    /// fresh random `jti`.
    pub fn new_access_token(
        payload: AccessTokenPayload,
        now: DateTime<Utc>,
        ttl: Duration,
        issuer: &str,
        audience: &[String],
    ) -> Self {
        let expiry = now + ttl;

        Self {
            sub: payload.user_id.to_string(),
            email: payload.email,
            username: payload.username,
            user_type: payload.user_type,
            permissions: payload.permissions,
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
            iss: issuer.to_string(),
            aud: audience.to_vec(),
        }
    }

    /// Parses the subject as the account id
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Not expired and past `nbf`
    pub fn is_valid(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.nbf && now < self.exp
    }
}

/// Client metadata recorded with each refresh token
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientMeta {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl ClientMeta {
    pub fn new(ip_address: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            ip_address: Some(ip_address.into()),
            user_agent: Some(user_agent.into()),
        }
    }
}

/// Refresh token record as persisted by the token store.
///
/// Only a one-way hash of the raw token is stored; the raw value exists
/// solely in the response to the client. Exactly one record per session
/// lineage is valid at a time; using it transitions the lineage to the
/// successor recorded in `replaced_by`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    pub id: Uuid,

    /// Account this token belongs to
    pub user_id: Uuid,

    /// Hex-encoded SHA-256 of the raw token
    pub token_hash: String,

    pub expires_at: DateTime<Utc>,

    pub created_at: DateTime<Utc>,

    /// Set when the token is revoked; never cleared
    pub revoked_at: Option<DateTime<Utc>>,

    /// The successor issued when this token was rotated (weak reference)
    pub replaced_by: Option<Uuid>,

    /// Client metadata captured at issuance
    #[serde(flatten)]
    pub client: ClientMeta,
}

impl RefreshToken {
    pub fn new(user_id: Uuid, token_hash: String, ttl: Duration, client: ClientMeta) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            token_hash,
            expires_at: now + ttl,
            created_at: now,
            revoked_at: None,
            replaced_by: None,
            client,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Not expired and not revoked
    pub fn is_valid(&self) -> bool {
        !self.is_expired() && !self.is_revoked()
    }

    /// Marks the token revoked; revoking an already-revoked token is a no-op
    pub fn revoke(&mut self) {
        if self.revoked_at.is_none() {
            self.revoked_at = Some(Utc::now());
        }
    }
}

/// Generates a cryptographically random raw refresh token: 256 bits of
/// entropy, URL-safe base64. This is the value sent to the client.
pub fn generate_token_string() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Access/refresh token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed JWT access token
    pub access_token: String,

    /// Raw refresh token
    pub refresh_token: String,

    /// Seconds until the access token expires
    pub expires_in: i64,
}
