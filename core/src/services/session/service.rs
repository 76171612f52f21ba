//! Main session service implementation

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;

use reg_shared::JwtConfig;

use crate::domain::entities::token::Claims;
use crate::domain::entities::user::User;
use crate::domain::value_objects::AuthResponse;
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::TokenRepository;

/// Verifies bearer tokens presented to protected endpoints
///
/// Object safe so the HTTP layer can hold it as `Arc<dyn AccessTokenVerifier>`
/// without knowing the repository type.
#[async_trait]
pub trait AccessTokenVerifier: Send + Sync {
    async fn verify_access_token(&self, token: &str) -> DomainResult<Claims>;
}

/// Service issuing, verifying and revoking HS256 access tokens
pub struct SessionService<T: TokenRepository> {
    repository: Arc<T>,
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl<T: TokenRepository> SessionService<T> {
    pub fn new(repository: Arc<T>, config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = 0;

        Self {
            repository,
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Issue an access token for an authenticated user
    pub fn issue(&self, user: &User) -> DomainResult<AuthResponse> {
        let claims = Claims::new_access_token(
            user.id,
            user.email.clone(),
            &self.config.issuer,
            &self.config.audience,
            self.config.access_token_expiry,
        );

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))?;

        Ok(AuthResponse::bearer(token, self.config.access_token_expiry, user.id))
    }

    /// Decode and validate `token`, refusing revoked sessions
    pub async fn verify(&self, token: &str) -> DomainResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => DomainError::Token(TokenError::AccessTokenExpired),
                _ => DomainError::Token(TokenError::InvalidAccessToken),
            })?;

        if self.repository.is_revoked(&token_data.claims.jti).await? {
            return Err(DomainError::Token(TokenError::TokenRevoked));
        }

        Ok(token_data.claims)
    }

    /// Revoke the session described by `claims` until it would have expired
    pub async fn revoke(&self, claims: &Claims) -> DomainResult<()> {
        let expires_at = Utc
            .timestamp_opt(claims.exp, 0)
            .single()
            .ok_or(DomainError::Token(TokenError::InvalidAccessToken))?;

        self.repository.revoke(&claims.jti, expires_at).await?;
        tracing::debug!(jti = %claims.jti, "Session revoked");
        Ok(())
    }

    /// Access token lifetime in seconds
    pub fn access_token_expiry(&self) -> i64 {
        self.config.access_token_expiry
    }
}

#[async_trait]
impl<T: TokenRepository + 'static> AccessTokenVerifier for SessionService<T> {
    async fn verify_access_token(&self, token: &str) -> DomainResult<Claims> {
        self.verify(token).await
    }
}
