//! Password change and reset handlers

pub mod change;
pub mod reset;

pub use change::change_password;
pub use reset::{confirm_password_reset, request_password_reset};
