//! Configuration for the registration service

use reg_shared::{AuthConfig, RegistrationConfig, DEFAULT_ACTIVATION_TIMEOUT_SECONDS};

/// Configuration for the registration service
#[derive(Debug, Clone)]
pub struct RegistrationServiceConfig {
    /// Maximum accepted age of an activation token in seconds
    pub activation_timeout_seconds: u64,
    /// bcrypt cost used when storing the password
    pub bcrypt_cost: u32,
}

impl Default for RegistrationServiceConfig {
    fn default() -> Self {
        Self {
            activation_timeout_seconds: DEFAULT_ACTIVATION_TIMEOUT_SECONDS,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl RegistrationServiceConfig {
    pub fn from_app(registration: &RegistrationConfig, auth: &AuthConfig) -> Self {
        Self {
            activation_timeout_seconds: registration.activation_timeout_seconds,
            bcrypt_cost: auth.bcrypt_cost,
        }
    }
}
