//! Tests for the in-memory user repository

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};
use crate::repositories::{InMemoryUserRepository, UserRepository};

fn user(email: &str, active: bool) -> User {
    let mut user = User::new(email.to_string(), "hash".to_string());
    if active {
        user.activate();
    }
    user
}

#[tokio::test]
async fn test_create_and_find() {
    let repo = InMemoryUserRepository::new();
    let created = repo.create(user("a@example.com", false)).await.unwrap();

    let found = repo.find_by_id(created.id).await.unwrap();
    assert_eq!(found, Some(created));
    assert!(repo.find_active_by_email("a@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_find_active_by_email_ignores_inactive() {
    let active = user("a@example.com", true);
    let repo = InMemoryUserRepository::with_users([user("a@example.com", false), active.clone()]);

    let found = repo.find_active_by_email("a@example.com").await.unwrap();
    assert_eq!(found.map(|u| u.id), Some(active.id));
}

#[tokio::test]
async fn test_create_rejects_second_active_owner() {
    let repo = InMemoryUserRepository::with_users([user("a@example.com", true)]);
    let result = repo.create(user("a@example.com", true)).await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::EmailTaken))));
}

#[tokio::test]
async fn test_create_allows_inactive_duplicates() {
    let repo = InMemoryUserRepository::new();
    repo.create(user("a@example.com", false)).await.unwrap();
    repo.create(user("a@example.com", false)).await.unwrap();
    assert_eq!(repo.len().await, 2);
}

#[tokio::test]
async fn test_update_unknown_user() {
    let repo = InMemoryUserRepository::new();
    let result = repo.update(user("a@example.com", false)).await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_delete() {
    let created = user("a@example.com", false);
    let repo = InMemoryUserRepository::with_users([created.clone()]);
    assert!(repo.delete(created.id).await.unwrap());
    assert!(!repo.delete(created.id).await.unwrap());
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_delete_inactive_by_email_spares_active_and_other_emails() {
    let active = user("a@example.com", true);
    let other = user("b@example.com", false);
    let repo = InMemoryUserRepository::with_users([
        user("a@example.com", false),
        user("a@example.com", false),
        active.clone(),
        other.clone(),
    ]);

    let deleted = repo.delete_inactive_by_email("a@example.com").await.unwrap();

    assert_eq!(deleted, 2);
    assert!(repo.find_by_id(active.id).await.unwrap().is_some());
    assert!(repo.find_by_id(other.id).await.unwrap().is_some());
    assert_eq!(repo.len().await, 2);
}

#[tokio::test]
async fn test_update_refuses_second_active_owner() {
    let owner = user("a@example.com", true);
    let mut pending = user("a@example.com", false);
    let repo = InMemoryUserRepository::with_users([owner, pending.clone()]);

    pending.activate();
    let result = repo.update(pending).await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::EmailTaken))));
}

#[tokio::test]
async fn test_find_all_by_email_includes_inactive() {
    let repo = InMemoryUserRepository::with_users([
        user("a@example.com", false),
        user("a@example.com", true),
        user("b@example.com", false),
    ]);

    let found = repo.find_all_by_email("a@example.com").await.unwrap();
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|u| u.email == "a@example.com"));
}
