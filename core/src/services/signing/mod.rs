//! Signed, time-limited tokens
//!
//! This module handles stateless, URL-safe tokens:
//! - HMAC-SHA256 timestamp signing of arbitrary values
//! - Activation tokens carrying a user identifier
//! - Password reset tokens bound to the current password
//! - Injectable clocks for deterministic expiry checks
//!
//! Tokens are never persisted. A token stays redeemable until it expires or
//! the secret key changes.

mod activation;
mod clock;
mod password_reset;
mod signer;

#[cfg(test)]
mod tests;

pub use activation::{ActivationCodec, ACTIVATION_SALT};
pub use clock::{Clock, FixedClock, SystemClock};
pub use password_reset::{
    password_fingerprint, PasswordResetClaims, PasswordResetCodec, PASSWORD_RESET_SALT,
};
pub use signer::{TimestampSigner, SEPARATOR};
