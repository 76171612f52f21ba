//! Password reset token codec
//!
//! The token carries the user id and a fingerprint of the current password
//! hash. Once the password changes the fingerprint no longer matches, so a
//! reset link works at most once.

use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::TokenError;

use super::clock::Clock;
use super::signer::TimestampSigner;

/// Salt namespacing password reset tokens
pub const PASSWORD_RESET_SALT: &str = "registration.password_reset";

/// Number of hash bytes kept in the fingerprint
const FINGERPRINT_BYTES: usize = 12;

/// Claims recovered from a verified reset token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordResetClaims {
    pub user_id: Uuid,
    pub fingerprint: String,
}

impl PasswordResetClaims {
    /// Whether the token was issued for the user's current password
    pub fn matches(&self, user: &User) -> bool {
        self.user_id == user.id
            && constant_time_eq::constant_time_eq(
                self.fingerprint.as_bytes(),
                password_fingerprint(&user.password_hash).as_bytes(),
            )
    }
}

#[derive(Debug, Clone)]
pub struct PasswordResetCodec {
    signer: TimestampSigner,
}

impl PasswordResetCodec {
    pub fn new(secret: &str) -> Self {
        Self {
            signer: TimestampSigner::new(secret, PASSWORD_RESET_SALT),
        }
    }

    pub fn with_clock(secret: &str, clock: Arc<dyn Clock>) -> Self {
        Self {
            signer: TimestampSigner::with_clock(secret, PASSWORD_RESET_SALT, clock),
        }
    }

    pub fn encode(&self, user: &User) -> Result<String, TokenError> {
        let value = format!("{}:{}", user.id, password_fingerprint(&user.password_hash));
        self.signer.sign(&value)
    }

    pub fn decode(&self, token: &str, max_age_seconds: u64) -> Result<PasswordResetClaims, TokenError> {
        let value = self
            .signer
            .unsign(token, Duration::from_secs(max_age_seconds))?;
        let (user_id, fingerprint) = value
            .split_once(':')
            .ok_or(TokenError::SignatureInvalid)?;
        let user_id = Uuid::parse_str(user_id).map_err(|_| TokenError::SignatureInvalid)?;

        Ok(PasswordResetClaims {
            user_id,
            fingerprint: fingerprint.to_string(),
        })
    }
}

/// Short, non-reversible fingerprint of a password hash
pub fn password_fingerprint(password_hash: &str) -> String {
    let digest = Sha256::digest(password_hash.as_bytes());
    hex::encode(&digest[..FINGERPRINT_BYTES])
}
