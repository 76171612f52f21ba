//! Session route handlers

pub mod login;
pub mod logout;

pub use login::login;
pub use logout::logout;
