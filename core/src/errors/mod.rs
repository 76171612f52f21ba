//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

pub use types::{AuthError, TokenError, ValidationError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

impl DomainError {
    /// Whether the failure was caused by the client's input rather than the
    /// server. Client errors are terminal and never retried.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            DomainError::Database(_)
                | DomainError::Internal { .. }
                | DomainError::Token(TokenError::TokenGenerationFailed)
        )
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
