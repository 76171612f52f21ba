//! Domain-specific error types for registration, authentication and tokens
//!
//! Error messages are configured externally in the presentation layer for
//! internationalization support; the `Display` output here is for logs.

use thiserror::Error;

/// Account and authentication errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("User not found")]
    UserNotFound,

    #[error("User is already active")]
    AlreadyActive,

    #[error("Email address already registered")]
    EmailTaken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Account is not activated")]
    AccountInactive,
}

/// Signed link and session token errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Signature does not verify: corrupted, forged, or signed with another key
    #[error("Signature invalid")]
    SignatureInvalid,

    /// Signature verifies but the token is older than the accepted maximum age
    #[error("Signature expired")]
    SignatureExpired,

    #[error("Access token expired")]
    AccessTokenExpired,

    #[error("Invalid access token")]
    InvalidAccessToken,

    #[error("Token revoked")]
    TokenRevoked,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Invalid length: {field} (max: {max})")]
    TooLong { field: String, max: usize },

    #[error("The two password fields didn't match")]
    PasswordMismatch,

    #[error("Password must contain at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Password is entirely numeric")]
    PasswordEntirelyNumeric,

    #[error("Password is too common")]
    PasswordTooCommon,

    #[error("Password is too similar to the email address")]
    PasswordTooSimilar,
}

impl AuthError {
    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::UserNotFound => "user_not_found",
            AuthError::AlreadyActive => "already_active",
            AuthError::EmailTaken => "email_taken",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::AccountInactive => "account_inactive",
        }
    }
}

impl TokenError {
    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::SignatureInvalid => "signature_invalid",
            TokenError::SignatureExpired => "signature_expired",
            TokenError::AccessTokenExpired => "access_token_expired",
            TokenError::InvalidAccessToken => "invalid_access_token",
            TokenError::TokenRevoked => "token_revoked",
            TokenError::TokenGenerationFailed => "token_generation_failed",
        }
    }
}

impl ValidationError {
    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::RequiredField { .. } => "required_field",
            ValidationError::InvalidEmail => "invalid_email",
            ValidationError::TooLong { .. } => "too_long",
            ValidationError::PasswordMismatch => "password_mismatch",
            ValidationError::PasswordTooShort { .. } => "password_too_short",
            ValidationError::PasswordEntirelyNumeric => "password_entirely_numeric",
            ValidationError::PasswordTooCommon => "password_too_common",
            ValidationError::PasswordTooSimilar => "password_too_similar",
        }
    }
}
