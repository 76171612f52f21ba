//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `auth` - Session token and password hashing configuration
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection
//! - `mail` - Outgoing mail delivery
//! - `registration` - Signed activation / password reset links
//! - `server` - HTTP server and CORS configuration

pub mod auth;
pub mod database;
pub mod environment;
pub mod mail;
pub mod registration;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{AuthConfig, JwtConfig};
pub use database::DatabaseConfig;
pub use environment::Environment;
pub use mail::MailConfig;
pub use registration::{
    RegistrationConfig, DEFAULT_ACTIVATION_TIMEOUT_SECONDS, DEFAULT_PASSWORD_RESET_TIMEOUT_SECONDS,
};
pub use server::{CorsConfig, ServerConfig};

/// Environment variables and the configuration keys they override
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("SERVER_HOST", "server.host"),
    ("SERVER_PORT", "server.port"),
    ("SERVER_WORKERS", "server.workers"),
    ("DATABASE_URL", "database.url"),
    ("DATABASE_MAX_CONNECTIONS", "database.max_connections"),
    ("DATABASE_CONNECT_TIMEOUT", "database.connect_timeout"),
    ("JWT_SECRET", "auth.jwt.secret"),
    ("JWT_ACCESS_TOKEN_EXPIRY", "auth.jwt.access_token_expiry"),
    ("BCRYPT_COST", "auth.bcrypt_cost"),
    ("SECRET_KEY", "registration.secret_key"),
    ("ACTIVATION_TIMEOUT_SECONDS", "registration.activation_timeout_seconds"),
    ("PASSWORD_RESET_TIMEOUT_SECONDS", "registration.password_reset_timeout_seconds"),
    ("SITE_DOMAIN", "registration.site_domain"),
    ("SITE_PROTOCOL", "registration.site_protocol"),
    ("MAIL_PROVIDER", "mail.provider"),
    ("MAIL_API_URL", "mail.api_url"),
    ("MAIL_API_KEY", "mail.api_key"),
    ("MAIL_FROM", "mail.from_address"),
    ("MAIL_TIMEOUT_SECS", "mail.timeout_secs"),
    ("CORS_MAX_AGE", "cors.max_age"),
];

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// Activation and password reset configuration
    #[serde(default)]
    pub registration: RegistrationConfig,

    /// Mail delivery configuration
    #[serde(default)]
    pub mail: MailConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            cors: CorsConfig::development(),
            ..Default::default()
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        let mut cors = CorsConfig::from_env();
        if cors.allowed_origins.is_empty() && environment.is_development() {
            cors = CorsConfig::development();
        }

        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            registration: RegistrationConfig::from_env(),
            mail: MailConfig::from_env(),
            cors,
        }
    }

    /// Load configuration from defaults, the environment-specific
    /// configuration file when it exists, and finally environment variables.
    ///
    /// A variable that is set always wins over the file.
    pub fn load() -> Result<Self, config::ConfigError> {
        let environment = Environment::from_env();
        Self::load_layered(environment, environment.config_file(), |name| {
            std::env::var(name).ok()
        })
    }

    fn load_layered(
        environment: Environment,
        file: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, config::ConfigError> {
        let mut defaults = Self {
            environment,
            ..Default::default()
        };
        if environment.is_development() {
            defaults.cors = CorsConfig::development();
        }

        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&defaults)?)
            .add_source(config::File::with_name(file).required(false))
            .set_override("environment", environment.to_string())?;

        for (variable, key) in ENV_OVERRIDES {
            if let Some(value) = lookup(variable) {
                builder = builder.set_override(*key, value)?;
            }
        }
        if let Some(origins) = lookup("ALLOWED_ORIGINS") {
            let origins: Vec<String> = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            builder = builder.set_override("cors.allowed_origins", origins)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Warnings about insecure settings, meant to be logged at startup
    pub fn security_warnings(&self) -> Vec<&'static str> {
        let mut warnings = Vec::new();
        if self.auth.jwt.is_using_default_secret() {
            warnings.push("JWT_SECRET is not set; using the development default");
        }
        if self.registration.is_using_default_secret() {
            warnings.push("SECRET_KEY is not set; activation links are signed with the development default");
        }
        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_warns_about_secrets() {
        let config = AppConfig::default();
        assert_eq!(config.security_warnings().len(), 2);
    }

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        let json = r#"{ "registration": { "secret_key": "k", "site_domain": "example.com", "site_protocol": "https" } }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.registration.secret_key, "k");
        assert_eq!(config.registration.activation_timeout_seconds, 86400);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.mail.provider, "mock");
    }

    #[test]
    fn test_environment_variables_win_over_file() {
        let path = std::env::temp_dir().join(format!("registra-config-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "[registration]\nsecret_key = \"from-file\"\nactivation_timeout_seconds = 10\n",
        )
        .unwrap();

        let config = AppConfig::load_layered(
            Environment::Production,
            path.to_str().unwrap(),
            |name| match name {
                "SECRET_KEY" => Some("from-env".to_string()),
                "SERVER_PORT" => Some("9090".to_string()),
                "ALLOWED_ORIGINS" => Some("https://a.example.com, https://b.example.com".to_string()),
                _ => None,
            },
        )
        .unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.registration.secret_key, "from-env");
        assert_eq!(config.registration.activation_timeout_seconds, 10);
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.cors.allowed_origins.len(), 2);
    }

    #[test]
    fn test_missing_file_keeps_defaults() {
        let config = AppConfig::load_layered(
            Environment::Development,
            "does-not-exist.toml",
            |_| None,
        )
        .unwrap();
        assert_eq!(config.registration.activation_timeout_seconds, 86400);
        assert!(config.cors.allows_any_origin());
    }

    #[test]
    fn test_development_config_is_permissive() {
        assert!(AppConfig::development().cors.allows_any_origin());
    }
}
