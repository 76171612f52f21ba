//! Email registration and account activation
//!
//! An account is created inactive, an activation link signed with the
//! process-wide secret is mailed to the address, and visiting the link
//! activates the account. Stale inactive registrations for an address are
//! discarded when the address registers again.

mod config;
mod service;

#[cfg(test)]
pub(crate) mod tests;

pub use config::RegistrationServiceConfig;
pub use service::RegistrationService;
