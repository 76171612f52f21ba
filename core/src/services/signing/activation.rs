//! Activation token codec
//!
//! Encodes a user identifier into a signed, URL-safe token that is emailed to
//! the user, and decodes it when the activation link is visited.

use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::errors::TokenError;

use super::clock::Clock;
use super::signer::TimestampSigner;

/// Salt namespacing activation tokens
pub const ACTIVATION_SALT: &str = "registration.activation";

#[derive(Debug, Clone)]
pub struct ActivationCodec {
    signer: TimestampSigner,
}

impl ActivationCodec {
    pub fn new(secret: &str) -> Self {
        Self {
            signer: TimestampSigner::new(secret, ACTIVATION_SALT),
        }
    }

    pub fn with_clock(secret: &str, clock: Arc<dyn Clock>) -> Self {
        Self {
            signer: TimestampSigner::with_clock(secret, ACTIVATION_SALT, clock),
        }
    }

    /// Produce the activation token for `user_id`
    pub fn encode(&self, user_id: Uuid) -> Result<String, TokenError> {
        self.signer.sign(&user_id.to_string())
    }

    /// Verify `token` and return the user identifier it carries
    ///
    /// Fails with `SignatureInvalid` or `SignatureExpired`; both are terminal.
    pub fn decode(&self, token: &str, max_age_seconds: u64) -> Result<Uuid, TokenError> {
        let value = self
            .signer
            .unsign(token, Duration::from_secs(max_age_seconds))?;
        Uuid::parse_str(&value).map_err(|_| TokenError::SignatureInvalid)
    }
}
