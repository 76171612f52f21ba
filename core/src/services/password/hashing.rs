//! bcrypt password hashing
//!
//! bcrypt is CPU bound, so the async variants move the work onto tokio's
//! blocking pool instead of stalling the worker thread.

use crate::errors::{DomainError, DomainResult};

/// Hash `password` with the given bcrypt cost
pub fn hash_password_blocking(password: &str, cost: u32) -> DomainResult<String> {
    bcrypt::hash(password, cost).map_err(|e| DomainError::Internal {
        message: format!("Failed to hash password: {}", e),
    })
}

/// Check `password` against a stored bcrypt hash
///
/// A malformed hash never verifies.
pub fn verify_password_blocking(password: &str, password_hash: &str) -> bool {
    bcrypt::verify(password, password_hash).unwrap_or(false)
}

pub async fn hash_password(password: String, cost: u32) -> DomainResult<String> {
    tokio::task::spawn_blocking(move || hash_password_blocking(&password, cost))
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Password hashing task failed: {}", e),
        })?
}

pub async fn verify_password(password: String, password_hash: String) -> DomainResult<bool> {
    tokio::task::spawn_blocking(move || verify_password_blocking(&password, &password_hash))
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Password verification task failed: {}", e),
        })
}
