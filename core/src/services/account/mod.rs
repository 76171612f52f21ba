//! Account management for registered users
//!
//! Covers everything after activation:
//! - Login and logout with JWT session tokens
//! - Password change and emailed password reset
//! - Profile names

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::AccountServiceConfig;
pub use service::AccountService;
