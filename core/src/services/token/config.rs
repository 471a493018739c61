//! Configuration for the token service

use aegis_shared::config::auth::JwtConfig;

/// Configuration for the token service.
///
/// The signing algorithm is pinned to HS256 and is not configurable;
/// verification rejects any token whose header claims otherwise.
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// Access token lifetime in seconds
    pub access_token_expiry_secs: i64,
    /// Refresh token lifetime in seconds
    pub refresh_token_expiry_secs: i64,
    /// Value of the `iss` claim, and the only issuer accepted
    pub issuer: String,
    /// Values of the `aud` claim; verification requires at least one match
    pub audience: Vec<String>,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self::from(&JwtConfig::default())
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            jwt_secret: config.secret.clone(),
            access_token_expiry_secs: config.access_token_expiry,
            refresh_token_expiry_secs: config.refresh_token_expiry,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
        }
    }
}
