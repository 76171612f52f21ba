//! HTTP transactional mail API
//!
//! Posts each message as JSON to the configured endpoint with the API key as
//! a bearer token, and reads the provider's message id from the response.
//! No retries are attempted; callers treat delivery as fire-and-forget.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

use reg_core::services::mail::EmailMessage;
use reg_shared::utils::validation::mask_email;
use reg_shared::MailConfig;

use crate::InfrastructureError;

use super::mail_service::MailService;

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    #[serde(alias = "message_id", alias = "messageId")]
    id: String,
}

/// Mail service backed by an HTTP transactional mail API
pub struct HttpMailService {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from_address: String,
}

impl HttpMailService {
    /// Create a new HTTP mail service
    ///
    /// Fails when the endpoint or the API key is missing.
    pub fn new(config: &MailConfig) -> Result<Self, InfrastructureError> {
        let api_url = config
            .api_url
            .clone()
            .filter(|url| !url.is_empty())
            .ok_or_else(|| InfrastructureError::Config("MAIL_API_URL is not set".to_string()))?;
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| InfrastructureError::Config("MAIL_API_KEY is not set".to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        info!("HTTP mail service initialized with sender: {}", config.from_address);

        Ok(Self {
            client,
            api_url,
            api_key,
            from_address: config.from_address.clone(),
        })
    }
}

#[async_trait]
impl MailService for HttpMailService {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        let request = SendRequest {
            from: &self.from_address,
            to: &message.to,
            subject: &message.subject,
            text: &message.body,
        };

        debug!("Sending email to {}", mask_email(&message.to));

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                "Mail API rejected message to {}: {} {}",
                mask_email(&message.to),
                status,
                body
            );
            return Err(InfrastructureError::Mail(format!(
                "Mail API returned {}",
                status
            )));
        }

        let sent: SendResponse = response.json().await?;
        info!(
            target: "mail_service",
            provider = "http",
            to = %mask_email(&message.to),
            message_id = %sent.id,
            "Email sent successfully"
        );

        Ok(sent.id)
    }

    fn provider_name(&self) -> &str {
        "HTTP"
    }
}
