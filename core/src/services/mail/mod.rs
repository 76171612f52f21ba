//! Outgoing mail abstraction and message templates

mod templates;
mod traits;

pub use templates::{activation_email, password_reset_email};
pub use traits::{EmailMessage, MailerTrait};
