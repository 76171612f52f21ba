//! In-memory implementation of TokenRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::DomainError;

use super::trait_::TokenRepository;

/// Revocation list kept in a `HashMap`, for tests and local development
#[derive(Clone, Default)]
pub struct InMemoryTokenRepository {
    revoked: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
}

impl InMemoryTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn revoke(&self, jti: &str, expires_at: DateTime<Utc>) -> Result<(), DomainError> {
        let mut revoked = self.revoked.write().await;
        revoked.insert(jti.to_string(), expires_at);
        Ok(())
    }

    async fn is_revoked(&self, jti: &str) -> Result<bool, DomainError> {
        let revoked = self.revoked.read().await;
        Ok(revoked
            .get(jti)
            .map_or(false, |expires_at| *expires_at > Utc::now()))
    }

    async fn purge_expired(&self) -> Result<u64, DomainError> {
        let mut revoked = self.revoked.write().await;
        let now = Utc::now();
        let before = revoked.len();
        revoked.retain(|_, expires_at| *expires_at > now);
        Ok((before - revoked.len()) as u64)
    }
}
