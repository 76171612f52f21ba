//! Registration, activation and password reset configuration

use serde::{Deserialize, Serialize};

const DEFAULT_SECRET_KEY: &str = "insecure-development-secret-key";

/// Default maximum age of an activation token (one day)
pub const DEFAULT_ACTIVATION_TIMEOUT_SECONDS: u64 = 60 * 60 * 24;

/// Default maximum age of a password reset token (three days)
pub const DEFAULT_PASSWORD_RESET_TIMEOUT_SECONDS: u64 = 60 * 60 * 24 * 3;

/// Configuration of the signed-link flows (activation and password reset)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegistrationConfig {
    /// Process-wide signing secret. Rotating it voids every outstanding link.
    pub secret_key: String,

    /// Maximum accepted age of an activation token in seconds
    #[serde(default = "default_activation_timeout")]
    pub activation_timeout_seconds: u64,

    /// Maximum accepted age of a password reset token in seconds
    #[serde(default = "default_password_reset_timeout")]
    pub password_reset_timeout_seconds: u64,

    /// Public domain used when building links sent by email
    pub site_domain: String,

    /// Scheme used when building links sent by email
    pub site_protocol: String,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            secret_key: String::from(DEFAULT_SECRET_KEY),
            activation_timeout_seconds: DEFAULT_ACTIVATION_TIMEOUT_SECONDS,
            password_reset_timeout_seconds: DEFAULT_PASSWORD_RESET_TIMEOUT_SECONDS,
            site_domain: String::from("localhost:8080"),
            site_protocol: String::from("http"),
        }
    }
}

impl RegistrationConfig {
    /// Create a configuration with an explicit secret
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            ..Default::default()
        }
    }

    /// Set the activation timeout
    pub fn with_activation_timeout(mut self, seconds: u64) -> Self {
        self.activation_timeout_seconds = seconds;
        self
    }

    /// Set the public site used in emailed links
    pub fn with_site(mut self, protocol: impl Into<String>, domain: impl Into<String>) -> Self {
        self.site_protocol = protocol.into();
        self.site_domain = domain.into();
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            secret_key: std::env::var("SECRET_KEY").unwrap_or(defaults.secret_key),
            activation_timeout_seconds: std::env::var("ACTIVATION_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.activation_timeout_seconds),
            password_reset_timeout_seconds: std::env::var("PASSWORD_RESET_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.password_reset_timeout_seconds),
            site_domain: std::env::var("SITE_DOMAIN").unwrap_or(defaults.site_domain),
            site_protocol: std::env::var("SITE_PROTOCOL").unwrap_or(defaults.site_protocol),
        }
    }
}

fn default_activation_timeout() -> u64 {
    DEFAULT_ACTIVATION_TIMEOUT_SECONDS
}

fn default_password_reset_timeout() -> u64 {
    DEFAULT_PASSWORD_RESET_TIMEOUT_SECONDS
}
