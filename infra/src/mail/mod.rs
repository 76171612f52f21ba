//! Mail Delivery Module
//!
//! This module provides mail delivery implementations for activation and
//! password reset emails.
//!
//! ## Features
//!
//! - **Mail Service Trait**: Common interface for all mail providers
//! - **Mock Implementation**: Console output and an inspectable outbox for development
//! - **HTTP Provider**: Transactional mail API reached over HTTPS
//! - **Adapter**: Bridges any provider to the core `MailerTrait`

use std::sync::Arc;

use reg_shared::MailConfig;

pub mod adapter;
pub mod http_mail;
pub mod mail_service;
pub mod mock_mail;

pub use adapter::MailServiceAdapter;
pub use http_mail::HttpMailService;
pub use mail_service::MailService;
pub use mock_mail::MockMailService;

#[cfg(test)]
mod tests;

/// Create a mail service based on configuration
///
/// Unknown providers and an HTTP provider that cannot be initialized fall
/// back to the mock service.
pub fn create_mail_service(config: &MailConfig) -> Arc<dyn MailService> {
    match config.provider.as_str() {
        "mock" => Arc::new(MockMailService::new()),
        "http" => match HttpMailService::new(config) {
            Ok(service) => Arc::new(service),
            Err(e) => {
                tracing::error!("Failed to initialize HTTP mail service: {}", e);
                tracing::warn!("Falling back to mock mail service");
                Arc::new(MockMailService::new())
            }
        },
        other => {
            tracing::warn!("Unknown mail provider '{}', using mock mail service", other);
            Arc::new(MockMailService::new())
        }
    }
}

/// Create a mailer for the core services from configuration
pub fn create_mailer(config: &MailConfig) -> MailServiceAdapter {
    MailServiceAdapter::new(create_mail_service(config))
}
