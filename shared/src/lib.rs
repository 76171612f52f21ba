//! Shared utilities and common types for the Registra server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures
//! - Email validation and masking helpers

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CorsConfig, DatabaseConfig, Environment, JwtConfig, MailConfig,
    RegistrationConfig, ServerConfig, DEFAULT_ACTIVATION_TIMEOUT_SECONDS,
    DEFAULT_PASSWORD_RESET_TIMEOUT_SECONDS,
};
pub use types::{ApiResponse, ErrorResponse};
pub use utils::validation;

#[cfg(test)]
mod tests {
    #[test]
    fn test_token_timeouts_reexported_at_root() {
        assert_eq!(crate::DEFAULT_ACTIVATION_TIMEOUT_SECONDS, 86400);
        assert_eq!(crate::DEFAULT_PASSWORD_RESET_TIMEOUT_SECONDS, 3 * 86400);
    }
}
