//! Public site information used to build links sent by email.

use serde::{Deserialize, Serialize};

/// Path under which activation links are served
pub const ACTIVATION_PATH: &str = "/api/v1/register/activate";

/// Path under which password reset links are served
pub const PASSWORD_RESET_PATH: &str = "/password/reset/confirm";

/// Scheme and domain the user reaches the service on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteContext {
    pub protocol: String,
    pub domain: String,
}

impl SiteContext {
    pub fn new(protocol: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            protocol: protocol.into(),
            domain: domain.into(),
        }
    }

    /// Absolute URL of the activation endpoint for `token`
    pub fn activation_url(&self, token: &str) -> String {
        format!("{}://{}{}/{}", self.protocol, self.domain, ACTIVATION_PATH, token)
    }

    /// Absolute URL of the password reset page for `token`
    pub fn password_reset_url(&self, token: &str) -> String {
        format!("{}://{}{}/{}", self.protocol, self.domain, PASSWORD_RESET_PATH, token)
    }
}

impl From<&reg_shared::RegistrationConfig> for SiteContext {
    fn from(config: &reg_shared::RegistrationConfig) -> Self {
        Self::new(config.site_protocol.clone(), config.site_domain.clone())
    }
}
