//! Token repository trait for tracking revoked session tokens.
//!
//! Session tokens are stateless JWTs; logging out records the token's `jti`
//! until its natural expiry so that it is refused afterwards.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::DomainError;

#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Record `jti` as revoked until `expires_at`
    async fn revoke(&self, jti: &str, expires_at: DateTime<Utc>) -> Result<(), DomainError>;

    /// Whether `jti` has been revoked and has not yet expired
    async fn is_revoked(&self, jti: &str) -> Result<bool, DomainError>;

    /// Drop revocation entries whose token has expired anyway
    ///
    /// Returns the number of removed entries.
    async fn purge_expired(&self) -> Result<u64, DomainError>;
}
