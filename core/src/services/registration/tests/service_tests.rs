//! Unit tests for registration service

use chrono::{TimeZone, Utc};
use std::sync::Arc;

use crate::domain::entities::user::{AccountState, User};
use crate::domain::value_objects::SiteContext;
use crate::errors::{AuthError, DomainError, TokenError, ValidationError};
use crate::repositories::{InMemoryUserRepository, UserRepository};
use crate::services::registration::{RegistrationService, RegistrationServiceConfig};
use crate::services::signing::{ActivationCodec, FixedClock};

use super::mocks::RecordingMailer;

const SECRET: &str = "registration-test-secret";
const PASSWORD: &str = "violet-harbour-42";

struct Fixture {
    service: RegistrationService<InMemoryUserRepository, RecordingMailer>,
    repository: Arc<InMemoryUserRepository>,
    mailer: Arc<RecordingMailer>,
    clock: Arc<FixedClock>,
}

fn fixture_with(repository: InMemoryUserRepository, mailer: RecordingMailer) -> Fixture {
    let repository = Arc::new(repository);
    let mailer = Arc::new(mailer);
    let clock = Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
    ));
    let config = RegistrationServiceConfig {
        activation_timeout_seconds: 86400,
        bcrypt_cost: 4,
    };
    let service = RegistrationService::new(
        repository.clone(),
        mailer.clone(),
        ActivationCodec::with_clock(SECRET, clock.clone()),
        config,
    );

    Fixture {
        service,
        repository,
        mailer,
        clock,
    }
}

fn fixture() -> Fixture {
    fixture_with(InMemoryUserRepository::new(), RecordingMailer::new())
}

fn site() -> SiteContext {
    SiteContext::new("https", "accounts.example.com")
}

fn existing(email: &str, active: bool) -> User {
    let mut user = User::new(email.to_string(), "hash".to_string());
    if active {
        user.activate();
    }
    user
}

#[tokio::test]
async fn test_register_creates_inactive_user_and_sends_link() {
    let f = fixture();

    let user = f
        .service
        .register("new@example.com", PASSWORD, PASSWORD, &site())
        .await
        .unwrap();

    assert!(!user.is_active);
    assert_eq!(user.state(), AccountState::PendingActivation);
    assert_ne!(user.password_hash, PASSWORD);

    let sent = f.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "new@example.com");
    assert!(sent[0]
        .body
        .contains("https://accounts.example.com/api/v1/register/activate/"));
}

#[tokio::test]
async fn test_register_normalizes_email_domain() {
    let f = fixture();

    let user = f
        .service
        .register("  New@Example.COM ", PASSWORD, PASSWORD, &site())
        .await
        .unwrap();

    assert_eq!(user.email, "New@example.com");
}

#[tokio::test]
async fn test_register_then_activate_then_activate_again() {
    let f = fixture();
    let user = f
        .service
        .register("flow@example.com", PASSWORD, PASSWORD, &site())
        .await
        .unwrap();
    let token = f.mailer.last_activation_token();

    let activated = f.service.activate(&token).await.unwrap();
    assert_eq!(activated.id, user.id);
    assert!(activated.is_active);

    let stored = f.repository.find_by_id(user.id).await.unwrap().unwrap();
    assert!(stored.is_active);

    let again = f.service.activate(&token).await;
    assert!(matches!(again, Err(DomainError::Auth(AuthError::AlreadyActive))));
}

#[tokio::test]
async fn test_collision_cleanup_replaces_inactive_registration() {
    let stale = existing("dup@example.com", false);
    let f = fixture_with(
        InMemoryUserRepository::with_users([stale.clone()]),
        RecordingMailer::new(),
    );

    let fresh = f
        .service
        .register("dup@example.com", PASSWORD, PASSWORD, &site())
        .await
        .unwrap();

    let records = f.repository.find_all_by_email("dup@example.com").await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, fresh.id);
    assert!(f.repository.find_by_id(stale.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_active_account_is_never_removed() {
    let owner = existing("taken@example.com", true);
    let f = fixture_with(
        InMemoryUserRepository::with_users([owner.clone()]),
        RecordingMailer::new(),
    );

    let result = f
        .service
        .register("taken@example.com", PASSWORD, PASSWORD, &site())
        .await;

    assert!(matches!(result, Err(DomainError::Auth(AuthError::EmailTaken))));
    assert_eq!(f.repository.len().await, 1);
    assert!(f.repository.find_by_id(owner.id).await.unwrap().is_some());
    assert!(f.mailer.sent().is_empty());
}

#[tokio::test]
async fn test_invalid_input_leaves_store_untouched() {
    let stale = existing("keep@example.com", false);
    let f = fixture_with(
        InMemoryUserRepository::with_users([stale.clone()]),
        RecordingMailer::new(),
    );

    let result = f
        .service
        .register("keep@example.com", PASSWORD, "different-password", &site())
        .await;
    assert!(matches!(
        result,
        Err(DomainError::ValidationErr(ValidationError::PasswordMismatch))
    ));
    assert!(f.repository.find_by_id(stale.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_register_rejects_bad_email() {
    let f = fixture();

    let invalid = f.service.register("not-an-email", PASSWORD, PASSWORD, &site()).await;
    assert!(matches!(
        invalid,
        Err(DomainError::ValidationErr(ValidationError::InvalidEmail))
    ));

    let empty = f.service.register("   ", PASSWORD, PASSWORD, &site()).await;
    assert!(matches!(
        empty,
        Err(DomainError::ValidationErr(ValidationError::RequiredField { .. }))
    ));
    assert!(f.repository.is_empty().await);
}

#[tokio::test]
async fn test_mail_failure_does_not_fail_registration() {
    let f = fixture_with(InMemoryUserRepository::new(), RecordingMailer::failing());

    let user = f
        .service
        .register("offline@example.com", PASSWORD, PASSWORD, &site())
        .await
        .unwrap();

    assert!(f.repository.find_by_id(user.id).await.unwrap().is_some());
    assert!(f.mailer.sent().is_empty());
}

#[tokio::test]
async fn test_expired_token_changes_nothing() {
    let f = fixture();
    let user = f
        .service
        .register("late@example.com", PASSWORD, PASSWORD, &site())
        .await
        .unwrap();
    let token = f.mailer.last_activation_token();

    f.clock.advance_seconds(86400 + 1);
    let result = f.service.activate(&token).await;

    assert!(matches!(result, Err(DomainError::Token(TokenError::SignatureExpired))));
    let stored = f.repository.find_by_id(user.id).await.unwrap().unwrap();
    assert!(!stored.is_active);
}

#[tokio::test]
async fn test_token_at_exact_timeout_is_accepted() {
    let f = fixture();
    f.service
        .register("edge@example.com", PASSWORD, PASSWORD, &site())
        .await
        .unwrap();
    let token = f.mailer.last_activation_token();

    f.clock.advance_seconds(86400);
    assert!(f.service.activate(&token).await.is_ok());
}

#[tokio::test]
async fn test_tampered_token_is_invalid() {
    let f = fixture();
    f.service
        .register("tamper@example.com", PASSWORD, PASSWORD, &site())
        .await
        .unwrap();
    let mut token = f.mailer.last_activation_token();
    let last = token.pop().unwrap();
    token.push(if last == 'A' { 'B' } else { 'A' });

    let result = f.service.activate(&token).await;
    assert!(matches!(result, Err(DomainError::Token(TokenError::SignatureInvalid))));
}

#[tokio::test]
async fn test_token_for_discarded_user_is_not_found() {
    let f = fixture();
    f.service
        .register("gone@example.com", PASSWORD, PASSWORD, &site())
        .await
        .unwrap();
    let first_token = f.mailer.last_activation_token();

    // registering again discards the first inactive record
    f.service
        .register("gone@example.com", PASSWORD, PASSWORD, &site())
        .await
        .unwrap();

    let result = f.service.activate(&first_token).await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::UserNotFound))));
}

#[tokio::test]
async fn test_token_from_another_secret_is_invalid() {
    let f = fixture();
    let other = ActivationCodec::with_clock("rotated-secret", f.clock.clone());
    let token = other.encode(uuid::Uuid::new_v4()).unwrap();

    let result = f.service.activate(&token).await;
    assert!(matches!(result, Err(DomainError::Token(TokenError::SignatureInvalid))));
}
