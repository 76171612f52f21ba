//! Traits for mail delivery integration

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A rendered, ready-to-send email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Trait for mail delivery integration
#[async_trait]
pub trait MailerTrait: Send + Sync {
    /// Deliver `message`, returning the provider's message id
    async fn send_mail(&self, message: &EmailMessage) -> Result<String, String>;
}

#[async_trait]
impl<M: MailerTrait + ?Sized> MailerTrait for Box<M> {
    async fn send_mail(&self, message: &EmailMessage) -> Result<String, String> {
        (**self).send_mail(message).await
    }
}

#[async_trait]
impl<M: MailerTrait + ?Sized> MailerTrait for std::sync::Arc<M> {
    async fn send_mail(&self, message: &EmailMessage) -> Result<String, String> {
        (**self).send_mail(message).await
    }
}
