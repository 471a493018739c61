//! Unit tests for the token service


use uuid::Uuid;

use crate::domain::entities::token::AccessTokenPayload;

use super::TokenServiceConfig;

pub(crate) fn test_config() -> TokenServiceConfig {
    TokenServiceConfig {
        jwt_secret: "unit-test-secret".to_string(),
        access_token_expiry_secs: 900,
        refresh_token_expiry_secs: 604_800,
        issuer: "aegis".to_string(),
        audience: vec!["aegis-api".to_string()],
    }
}

pub(crate) fn test_payload(user_id: Uuid) -> AccessTokenPayload {
    AccessTokenPayload {
        user_id,
        email: "alice@example.com".to_string(),
        username: "alice".to_string(),
        user_type: "customer".to_string(),
        permissions: vec!["orders:read".to_string(), "orders:write".to_string()],
    }
}
