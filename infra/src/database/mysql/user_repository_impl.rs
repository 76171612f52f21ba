//! MySQL implementation of the UserRepository trait.
//!
//! Uniqueness of active email addresses is enforced by the
//! `uq_users_active_email` index; a violation surfaces as `EmailTaken`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use reg_core::domain::entities::user::User;
use reg_core::errors::{AuthError, DomainError};
use reg_core::repositories::UserRepository;

const USER_COLUMNS: &str = r#"
    id, email, password_hash, is_active, first_name, last_name,
    created_at, updated_at, last_login_at
"#;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::Database(format!("Failed to get id: {}", e)))?;

        Ok(User {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::Database(format!("Invalid UUID: {}", e)))?,
            email: row
                .try_get("email")
                .map_err(|e| DomainError::Database(format!("Failed to get email: {}", e)))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| DomainError::Database(format!("Failed to get password_hash: {}", e)))?,
            is_active: row
                .try_get("is_active")
                .map_err(|e| DomainError::Database(format!("Failed to get is_active: {}", e)))?,
            first_name: row
                .try_get("first_name")
                .map_err(|e| DomainError::Database(format!("Failed to get first_name: {}", e)))?,
            last_name: row
                .try_get("last_name")
                .map_err(|e| DomainError::Database(format!("Failed to get last_name: {}", e)))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Database(format!("Failed to get created_at: {}", e)))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Database(format!("Failed to get updated_at: {}", e)))?,
            last_login_at: row
                .try_get("last_login_at")
                .map_err(|e| DomainError::Database(format!("Failed to get last_login_at: {}", e)))?,
        })
    }

    /// Map a write failure, turning unique index violations into `EmailTaken`
    fn write_error(context: &str, e: sqlx::Error) -> DomainError {
        if let sqlx::Error::Database(db_error) = &e {
            if db_error.is_unique_violation() {
                return DomainError::Auth(AuthError::EmailTaken);
            }
        }
        DomainError::Database(format!("{}: {}", context, e))
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = ? LIMIT 1", USER_COLUMNS);

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Database query failed: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_active_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!(
            "SELECT {} FROM users WHERE active_email = ? LIMIT 1",
            USER_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Database query failed: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_all_by_email(&self, email: &str) -> Result<Vec<User>, DomainError> {
        let query = format!(
            "SELECT {} FROM users WHERE email = ? ORDER BY created_at",
            USER_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(email)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Database query failed: {}", e)))?;

        rows.iter().map(Self::row_to_user).collect()
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, email, password_hash, is_active, first_name, last_name,
                created_at, updated_at, last_login_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.is_active)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(user.created_at)
            .bind(user.updated_at)
            .bind(user.last_login_at)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::write_error("Failed to create user", e))?;

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users SET
                email = ?,
                password_hash = ?,
                is_active = ?,
                first_name = ?,
                last_name = ?,
                updated_at = ?,
                last_login_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.is_active)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(user.updated_at)
            .bind(user.last_login_at)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| Self::write_error("Failed to update user", e))?;

        if result.rows_affected() == 0 && self.find_by_id(user.id).await?.is_none() {
            return Err(DomainError::NotFound {
                resource: "User".to_string(),
            });
        }

        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Failed to delete user: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_inactive_by_email(&self, email: &str) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE email = ? AND is_active = FALSE")
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::Database(format!("Failed to delete inactive users: {}", e))
            })?;

        Ok(result.rows_affected())
    }
}
