//! Mail Service Interface

use async_trait::async_trait;

use reg_core::services::mail::EmailMessage;

use crate::InfrastructureError;

/// Mail service trait for delivering rendered emails
///
/// Implementations include:
/// - HTTP transactional mail API
/// - Mock implementation for development
#[async_trait]
pub trait MailService: Send + Sync {
    /// Deliver an email
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Provider identifier of the accepted message
    /// * `Err(InfrastructureError)` - If delivery fails
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError>;

    /// Name of the mail provider (e.g. "HTTP", "Mock")
    fn provider_name(&self) -> &str;

    /// Check if the service is available
    async fn is_available(&self) -> bool {
        true
    }
}
