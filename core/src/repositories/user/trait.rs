//! User repository trait defining the interface for user data persistence.
//!
//! The trait is async-first and returns `DomainError` for storage failures.
//! Email lookups are exact matches on the normalized address.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user found with given ID
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find the active user owning `email`, if any
    async fn find_active_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Every user registered with `email`, active or not, oldest first
    async fn find_all_by_email(&self, email: &str) -> Result<Vec<User>, DomainError>;

    /// Create a new user in the repository
    ///
    /// Fails when an *active* user already owns the email address.
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user in the repository
    ///
    /// # Returns
    /// * `Ok(User)` - The updated user
    /// * `Err(DomainError::NotFound)` - No user with that ID
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Delete a user from the repository
    ///
    /// # Returns
    /// * `Ok(true)` - User was deleted
    /// * `Ok(false)` - User not found
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Delete every inactive user registered with `email`
    ///
    /// Active users are never touched. Returns the number of deleted rows.
    async fn delete_inactive_by_email(&self, email: &str) -> Result<u64, DomainError>;
}
