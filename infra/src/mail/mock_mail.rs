//! Mock Mail Service Implementation
//!
//! Logs messages instead of sending them and keeps them in an outbox so that
//! tests and local development can pick up activation links.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use uuid::Uuid;

use reg_core::services::mail::EmailMessage;
use reg_shared::utils::validation::mask_email;

use crate::InfrastructureError;

use super::mail_service::MailService;

/// Mock mail service for development and testing
#[derive(Clone)]
pub struct MockMailService {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Every message accepted so far
    outbox: Arc<Mutex<Vec<EmailMessage>>>,
    /// Whether to simulate failures (for testing)
    simulate_failure: Arc<AtomicBool>,
    /// Whether to print messages to console
    console_output: bool,
}

impl MockMailService {
    /// Create a new mock mail service
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    /// Create a mock service with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            outbox: Arc::new(Mutex::new(Vec::new())),
            simulate_failure: Arc::new(AtomicBool::new(simulate_failure)),
            console_output,
        }
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Messages accepted so far, oldest first
    pub fn sent_messages(&self) -> Vec<EmailMessage> {
        match self.outbox.lock() {
            Ok(outbox) => outbox.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Most recent message sent to `to`
    pub fn last_message_to(&self, to: &str) -> Option<EmailMessage> {
        self.sent_messages().into_iter().rev().find(|m| m.to == to)
    }

    /// Clear the outbox and reset the counter
    pub fn reset(&self) {
        self.message_count.store(0, Ordering::SeqCst);
        if let Ok(mut outbox) = self.outbox.lock() {
            outbox.clear();
        }
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }
}

impl Default for MockMailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MailService for MockMailService {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        let masked_to = mask_email(&message.to);

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!("Mock mail service simulating failure for {}", masked_to);
            return Err(InfrastructureError::Mail(
                "Simulated mail delivery failure".to_string(),
            ));
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;
        if let Ok(mut outbox) = self.outbox.lock() {
            outbox.push(message.clone());
        }

        if self.console_output {
            println!("\n{}", "=".repeat(60));
            println!("MOCK MAIL SERVICE - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {}", message.to);
            println!("Subject: {}", message.subject);
            println!("Message ID: {}", message_id);
            println!("\n{}", message.body);
            println!("{}\n", "=".repeat(60));
        }

        info!(
            target: "mail_service",
            provider = "mock",
            to = %masked_to,
            message_id = %message_id,
            body_length = message.body.len(),
            "Email sent successfully (mock)"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }

    async fn is_available(&self) -> bool {
        !self.simulate_failure.load(Ordering::SeqCst)
    }
}
