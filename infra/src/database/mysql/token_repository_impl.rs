//! MySQL implementation of the TokenRepository trait.
//!
//! Stores the `jti` of session tokens revoked by logout until the token's own
//! expiry, after which the row can be purged.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use reg_core::errors::DomainError;
use reg_core::repositories::TokenRepository;

/// MySQL implementation of TokenRepository
pub struct MySqlTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlTokenRepository {
    /// Create a new MySQL token repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenRepository for MySqlTokenRepository {
    async fn revoke(&self, jti: &str, expires_at: DateTime<Utc>) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO revoked_tokens (jti, expires_at, revoked_at)
            VALUES (?, ?, ?)
            ON DUPLICATE KEY UPDATE expires_at = VALUES(expires_at)
        "#;

        sqlx::query(query)
            .bind(jti)
            .bind(expires_at)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to revoke token: {}", e),
            })?;

        Ok(())
    }

    async fn is_revoked(&self, jti: &str) -> Result<bool, DomainError> {
        let query = r#"
            SELECT EXISTS(
                SELECT 1 FROM revoked_tokens WHERE jti = ? AND expires_at > ?
            ) AS revoked
        "#;

        let row = sqlx::query(query)
            .bind(jti)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to check token revocation: {}", e),
            })?;

        let revoked: i64 = row.try_get("revoked").map_err(|e| DomainError::Internal {
            message: format!("Failed to get revocation result: {}", e),
        })?;

        Ok(revoked == 1)
    }

    async fn purge_expired(&self) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM revoked_tokens WHERE expires_at <= ?")
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to purge revoked tokens: {}", e),
            })?;

        let purged = result.rows_affected();
        if purged > 0 {
            tracing::info!("Purged {} expired token revocations", purged);
        }
        Ok(purged)
    }
}
