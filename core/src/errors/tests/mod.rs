//! Unit tests for domain error types

use crate::errors::{AuthError, DomainError, TokenError, ValidationError};

#[test]
fn test_signature_errors_are_distinct() {
    assert_ne!(TokenError::SignatureInvalid, TokenError::SignatureExpired);
    assert_ne!(TokenError::SignatureInvalid.code(), TokenError::SignatureExpired.code());
}

#[test]
fn test_bridge_conversions() {
    let error: DomainError = AuthError::AlreadyActive.into();
    assert!(matches!(error, DomainError::Auth(AuthError::AlreadyActive)));

    let error: DomainError = TokenError::SignatureExpired.into();
    assert_eq!(error.to_string(), "Signature expired");

    let error: DomainError = ValidationError::PasswordTooShort { min: 8 }.into();
    assert!(error.to_string().contains('8'));
}

#[test]
fn test_activation_failures_are_client_errors() {
    for error in [
        DomainError::from(TokenError::SignatureInvalid),
        DomainError::from(TokenError::SignatureExpired),
        DomainError::from(AuthError::UserNotFound),
        DomainError::from(AuthError::AlreadyActive),
    ] {
        assert!(error.is_client_error(), "{error} should be a client error");
    }
}

#[test]
fn test_infrastructure_failures_are_server_errors() {
    assert!(!DomainError::Database("connection reset".to_string()).is_client_error());
    assert!(!DomainError::Internal { message: "boom".to_string() }.is_client_error());
    assert!(!DomainError::from(TokenError::TokenGenerationFailed).is_client_error());
}
