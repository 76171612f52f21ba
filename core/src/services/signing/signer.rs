//! HMAC-SHA256 timestamp signer
//!
//! Token layout, every segment unpadded base64url:
//!
//! ```text
//! value ":" timestamp ":" signature
//! ```
//!
//! The MAC covers the literal `value:timestamp` text, so changing any
//! character of a token makes verification fail.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Duration;

use crate::errors::TokenError;

use super::clock::{Clock, SystemClock};

type HmacSha256 = Hmac<Sha256>;

/// Separator between token segments. URL-safe and outside the base64url alphabet.
pub const SEPARATOR: char = ':';

/// Signs values together with their issuance time and verifies them later
#[derive(Clone)]
pub struct TimestampSigner {
    /// Key derived from the secret and the salt
    key: [u8; 32],
    clock: Arc<dyn Clock>,
}

impl TimestampSigner {
    /// Create a signer using the wall clock
    ///
    /// `salt` namespaces tokens: a token signed under one salt never verifies
    /// under another, even with the same secret.
    pub fn new(secret: &str, salt: &str) -> Self {
        Self::with_clock(secret, salt, Arc::new(SystemClock))
    }

    /// Create a signer with an explicit time source
    pub fn with_clock(secret: &str, salt: &str, clock: Arc<dyn Clock>) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(b"signer");
        hasher.update(secret.as_bytes());

        Self {
            key: hasher.finalize().into(),
            clock,
        }
    }

    /// Sign `value`, embedding the current time
    pub fn sign(&self, value: &str) -> Result<String, TokenError> {
        let timestamp = self.clock.now().timestamp().max(0) as u64;
        let payload = format!(
            "{}{}{}",
            URL_SAFE_NO_PAD.encode(value.as_bytes()),
            SEPARATOR,
            URL_SAFE_NO_PAD.encode(timestamp.to_be_bytes()),
        );
        let signature = self.signature(&payload)?;

        Ok(format!("{}{}{}", payload, SEPARATOR, signature))
    }

    /// Verify `token` and return the signed value
    ///
    /// # Errors
    ///
    /// * `TokenError::SignatureInvalid` - malformed token or signature mismatch
    /// * `TokenError::SignatureExpired` - valid signature, but the token is
    ///   older than `max_age`
    pub fn unsign(&self, token: &str, max_age: Duration) -> Result<String, TokenError> {
        let (payload, signature) = token
            .rsplit_once(SEPARATOR)
            .ok_or(TokenError::SignatureInvalid)?;

        let expected = self.signature(payload)?;
        if !constant_time_eq::constant_time_eq(expected.as_bytes(), signature.as_bytes()) {
            return Err(TokenError::SignatureInvalid);
        }

        let (value, timestamp) = payload
            .split_once(SEPARATOR)
            .ok_or(TokenError::SignatureInvalid)?;
        let value = decode_value(value)?;
        let timestamp = decode_timestamp(timestamp)?;

        let now = self.clock.now().timestamp();
        let timestamp = i64::try_from(timestamp).map_err(|_| TokenError::SignatureInvalid)?;
        let max_age = i64::try_from(max_age.as_secs()).unwrap_or(i64::MAX);
        if now.saturating_sub(timestamp) > max_age {
            return Err(TokenError::SignatureExpired);
        }

        Ok(value)
    }

    fn signature(&self, payload: &str) -> Result<String, TokenError> {
        let mut mac = HmacSha256::new_from_slice(&self.key)
            .map_err(|_| TokenError::TokenGenerationFailed)?;
        mac.update(payload.as_bytes());
        Ok(URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
    }
}

fn decode_value(segment: &str) -> Result<String, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| TokenError::SignatureInvalid)?;
    String::from_utf8(bytes).map_err(|_| TokenError::SignatureInvalid)
}

fn decode_timestamp(segment: &str) -> Result<u64, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| TokenError::SignatureInvalid)?;
    let bytes: [u8; 8] = bytes
        .try_into()
        .map_err(|_| TokenError::SignatureInvalid)?;
    Ok(u64::from_be_bytes(bytes))
}

impl std::fmt::Debug for TimestampSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimestampSigner").finish_non_exhaustive()
    }
}
