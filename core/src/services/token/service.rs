//! Main token service implementation

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sha2::{Digest, Sha256};
use tracing::warn;
use uuid::Uuid;

use crate::domain::entities::token::{
    generate_token_string, AccessTokenPayload, Claims, ClientMeta, RefreshToken,
};
use crate::errors::{DomainError, TokenError};
use crate::repositories::TokenRepository;

use super::config::TokenServiceConfig;

/// Service for managing JWT access tokens and refresh tokens
pub struct TokenService<R: TokenRepository> {
    pub(crate) repository: R,
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl<R: TokenRepository> TokenService<R> {
    /// Creates a new token service instance
    pub fn new(repository: R, config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&config.audience);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            repository,
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Seconds an access token stays valid; the `expires_in` of responses
    pub fn access_token_expiry_secs(&self) -> i64 {
        self.config.access_token_expiry_secs
    }

    /// Signs an access token for the given identity snapshot.
    ///
    /// The claims embed the permission set as they stand at issuance; a
    /// later role change is not reflected until the token is refreshed.
    pub fn generate_access_token(
        &self,
        payload: AccessTokenPayload,
    ) -> Result<String, DomainError> {
        let claims = Claims::new_access_token(
            payload,
            Utc::now(),
            Duration::seconds(self.config.access_token_expiry_secs),
            &self.config.issuer,
            &self.config.audience,
        );
        let header = Header::new(Algorithm::HS256);
        encode(&header, &claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Verifies an access token and returns the claims.
    ///
    /// # Returns
    /// * `Ok(Claims)` - The decoded claims if valid
    /// * `Err(DomainError::Token(TokenExpired))` - Past `exp`
    /// * `Err(DomainError::Token(TokenNotYetValid))` - Before `nbf`
    /// * `Err(DomainError::Token(InvalidSignature))` - Bad signature, or a
    ///   header claiming any algorithm other than HS256
    /// * `Err(DomainError::Token(InvalidTokenFormat))` - Anything else:
    ///   malformed structure, wrong issuer, wrong audience
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        DomainError::Token(TokenError::TokenExpired)
                    }
                    jsonwebtoken::errors::ErrorKind::ImmatureSignature => {
                        DomainError::Token(TokenError::TokenNotYetValid)
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature
                    | jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => {
                        DomainError::Token(TokenError::InvalidSignature)
                    }
                    _ => DomainError::Token(TokenError::InvalidTokenFormat),
                }
            })?;

        Ok(token_data.claims)
    }

    /// Issues a new refresh token for a user, persisting only its hash.
    ///
    /// When `predecessor` is set this issuance is a rotation and the old
    /// record is linked to the new one.
    ///
    /// # Returns
    /// * `Ok((String, RefreshToken))` - The raw token for the client and
    ///   the stored record
    pub async fn issue_refresh_token(
        &self,
        user_id: Uuid,
        client: ClientMeta,
        predecessor: Option<Uuid>,
    ) -> Result<(String, RefreshToken), DomainError> {
        let raw = generate_token_string();
        let record = RefreshToken::new(
            user_id,
            self.hash_token(&raw),
            Duration::seconds(self.config.refresh_token_expiry_secs),
            client,
        );

        let record = self.repository.create(record).await?;
        if let Some(predecessor) = predecessor {
            self.repository
                .link_replacement(predecessor, record.id)
                .await?;
        }
        Ok((raw, record))
    }

    /// Consumes a refresh token: validates it and atomically transitions
    /// it from valid to revoked. At most one caller ever wins this
    /// transition for a given token.
    ///
    /// Presenting an already-revoked token is treated as theft evidence;
    /// every outstanding token for that user is revoked before the error
    /// is returned. The same applies to the loser of a concurrent race,
    /// since either the caller or the racer is not the legitimate client.
    ///
    /// # Returns
    /// * `Ok(RefreshToken)` - The consumed record; the caller issues the
    ///   successor
    /// * `Err(DomainError::Token(InvalidRefreshToken))` - Unknown token
    /// * `Err(DomainError::Token(TokenExpired))` - Past its expiry
    /// * `Err(DomainError::Token(TokenReused))` - Reuse detected; the
    ///   user's sessions have been revoked
    pub async fn consume_refresh_token(&self, raw: &str) -> Result<RefreshToken, DomainError> {
        let token_hash = self.hash_token(raw);

        let record = self
            .repository
            .find_by_hash(&token_hash)
            .await?
            .ok_or(DomainError::Token(TokenError::InvalidRefreshToken))?;

        if record.is_expired() {
            return Err(DomainError::Token(TokenError::TokenExpired));
        }

        if record.is_revoked() || !self.repository.revoke(record.id).await? {
            warn!(
                user_id = %record.user_id,
                token_id = %record.id,
                "refresh token reuse detected, revoking all sessions"
            );
            let revoked = self.repository.revoke_all_for_user(record.user_id).await?;
            warn!(user_id = %record.user_id, revoked, "sessions revoked");
            return Err(DomainError::Token(TokenError::TokenReused));
        }

        Ok(record)
    }

    /// Revokes the refresh token behind `raw`, if it exists.
    ///
    /// Unknown and already-revoked tokens succeed silently; logout is
    /// idempotent and reveals nothing about token validity.
    ///
    /// # Returns
    /// * `Ok(Some(Uuid))` - The owning user, when the token was known
    /// * `Ok(None)` - No such token; nothing happened
    pub async fn revoke_refresh_token(&self, raw: &str) -> Result<Option<Uuid>, DomainError> {
        let token_hash = self.hash_token(raw);

        match self.repository.find_by_hash(&token_hash).await? {
            Some(record) => {
                self.repository.revoke(record.id).await?;
                Ok(Some(record.user_id))
            }
            None => Ok(None),
        }
    }

    /// Revokes every outstanding refresh token for a user.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of tokens newly revoked
    pub async fn revoke_all_user_tokens(&self, user_id: Uuid) -> Result<usize, DomainError> {
        self.repository.revoke_all_for_user(user_id).await
    }

    /// Hex-encoded SHA-256 of a raw token; the only form ever persisted
    pub(crate) fn hash_token(&self, raw: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(raw.as_bytes());
        hex::encode(hasher.finalize())
    }
}
