//! Outgoing mail configuration

use serde::{Deserialize, Serialize};

/// Mail delivery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// Delivery provider ("mock" or "http")
    pub provider: String,

    /// Endpoint of the transactional mail API (http provider)
    #[serde(default)]
    pub api_url: Option<String>,

    /// API key sent as a bearer token (http provider)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Sender address
    pub from_address: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: String::from("mock"),
            api_url: None,
            api_key: None,
            from_address: String::from("no-reply@localhost"),
            timeout_secs: default_timeout(),
        }
    }
}

impl MailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: std::env::var("MAIL_PROVIDER").unwrap_or(defaults.provider),
            api_url: std::env::var("MAIL_API_URL").ok(),
            api_key: std::env::var("MAIL_API_KEY").ok(),
            from_address: std::env::var("MAIL_FROM").unwrap_or(defaults.from_address),
            timeout_secs: std::env::var("MAIL_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }

    /// Whether mails are only logged instead of delivered
    pub fn is_mock(&self) -> bool {
        self.provider == "mock"
    }
}

fn default_timeout() -> u64 {
    10
}
