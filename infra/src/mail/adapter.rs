//! Mail Service Trait Adapter
//!
//! Implements the core `MailerTrait` on top of any infrastructure
//! `MailService`, so the domain services never see `InfrastructureError`.

use async_trait::async_trait;
use std::sync::Arc;

use reg_core::services::mail::{EmailMessage, MailerTrait};

use super::mail_service::MailService;

/// Adapter that implements the core MailerTrait for a mail provider
#[derive(Clone)]
pub struct MailServiceAdapter {
    inner: Arc<dyn MailService>,
}

impl MailServiceAdapter {
    pub fn new(inner: Arc<dyn MailService>) -> Self {
        Self { inner }
    }

    /// Name of the wrapped provider
    pub fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}

#[async_trait]
impl MailerTrait for MailServiceAdapter {
    async fn send_mail(&self, message: &EmailMessage) -> Result<String, String> {
        self.inner
            .send_email(message)
            .await
            .map_err(|e| e.to_string())
    }
}
