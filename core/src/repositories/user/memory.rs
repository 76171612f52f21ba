//! In-memory implementation of UserRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};

use super::trait_::UserRepository;

/// User repository backed by a `HashMap`, for tests and local development
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with `users`
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let map = users.into_iter().map(|u| (u.id, u)).collect();
        Self {
            users: Arc::new(RwLock::new(map)),
        }
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_active_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.is_active && u.email == email)
            .cloned())
    }

    async fn find_all_by_email(&self, email: &str) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().await;
        let mut found: Vec<User> = users.values().filter(|u| u.email == email).cloned().collect();
        found.sort_by_key(|u| u.created_at);
        Ok(found)
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.is_active && u.email == user.email) {
            return Err(DomainError::Auth(AuthError::EmailTaken));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(DomainError::NotFound {
                resource: "User".to_string(),
            });
        }

        if user.is_active
            && users
                .values()
                .any(|u| u.id != user.id && u.is_active && u.email == user.email)
        {
            return Err(DomainError::Auth(AuthError::EmailTaken));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        Ok(users.remove(&id).is_some())
    }

    async fn delete_inactive_by_email(&self, email: &str) -> Result<u64, DomainError> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|_, u| u.is_active || u.email != email);
        Ok((before - users.len()) as u64)
    }
}
