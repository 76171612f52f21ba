//! Configuration for the account service

use reg_shared::{AuthConfig, RegistrationConfig, DEFAULT_PASSWORD_RESET_TIMEOUT_SECONDS};

/// Configuration for the account service
#[derive(Debug, Clone)]
pub struct AccountServiceConfig {
    /// Maximum accepted age of a password reset token in seconds
    pub password_reset_timeout_seconds: u64,
    /// bcrypt cost used when storing a new password
    pub bcrypt_cost: u32,
    /// Maximum length of each profile name
    pub max_name_length: usize,
}

impl Default for AccountServiceConfig {
    fn default() -> Self {
        Self {
            password_reset_timeout_seconds: DEFAULT_PASSWORD_RESET_TIMEOUT_SECONDS,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            max_name_length: 150,
        }
    }
}

impl AccountServiceConfig {
    pub fn from_app(registration: &RegistrationConfig, auth: &AuthConfig) -> Self {
        Self {
            password_reset_timeout_seconds: registration.password_reset_timeout_seconds,
            bcrypt_cost: auth.bcrypt_cost,
            ..Default::default()
        }
    }
}
