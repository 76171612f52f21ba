//! Unit tests for mail delivery

use reg_core::services::mail::{EmailMessage, MailerTrait};
use reg_shared::MailConfig;

use crate::mail::{create_mail_service, create_mailer, HttpMailService, MailService, MailServiceAdapter, MockMailService};
use crate::InfrastructureError;

fn message(to: &str) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: "Activate your account on example.com".to_string(),
        body: "https://example.com/api/v1/register/activate/a:b:c".to_string(),
    }
}

#[tokio::test]
async fn test_mock_mail_records_outbox() {
    let service = MockMailService::with_options(false, false);

    let id = service.send_email(&message("u@example.com")).await.unwrap();
    assert!(id.starts_with("mock_"));
    assert_eq!(service.get_message_count(), 1);
    assert_eq!(
        service.last_message_to("u@example.com").map(|m| m.body),
        Some("https://example.com/api/v1/register/activate/a:b:c".to_string())
    );

    service.reset();
    assert!(service.sent_messages().is_empty());
}

#[tokio::test]
async fn test_mock_mail_simulated_failure() {
    let service = MockMailService::with_options(false, true);

    let result = service.send_email(&message("u@example.com")).await;
    assert!(matches!(result, Err(InfrastructureError::Mail(_))));
    assert!(!service.is_available().await);
    assert_eq!(service.get_message_count(), 0);
}

#[tokio::test]
async fn test_adapter_maps_errors_to_strings() {
    let mock = MockMailService::with_options(false, false);
    let adapter = MailServiceAdapter::new(std::sync::Arc::new(mock.clone()));

    assert!(adapter.send_mail(&message("u@example.com")).await.is_ok());
    assert_eq!(mock.sent_messages().len(), 1);

    mock.set_simulate_failure(true);
    let error = adapter.send_mail(&message("u@example.com")).await.unwrap_err();
    assert!(error.contains("Simulated"));
}

#[test]
fn test_http_mail_requires_endpoint_and_key() {
    let config = MailConfig {
        provider: "http".to_string(),
        ..Default::default()
    };
    assert!(matches!(
        HttpMailService::new(&config),
        Err(InfrastructureError::Config(_))
    ));
}

#[test]
fn test_factory_falls_back_to_mock() {
    let config = MailConfig {
        provider: "http".to_string(),
        ..Default::default()
    };
    assert_eq!(create_mail_service(&config).provider_name(), "Mock");

    let config = MailConfig {
        provider: "carrier-pigeon".to_string(),
        ..Default::default()
    };
    assert_eq!(create_mailer(&config).provider_name(), "Mock");
}

#[test]
fn test_factory_builds_http_service() {
    let config = MailConfig {
        provider: "http".to_string(),
        api_url: Some("https://mail.example.com/v1/send".to_string()),
        api_key: Some("key".to_string()),
        ..Default::default()
    };
    assert_eq!(create_mail_service(&config).provider_name(), "HTTP");
}
