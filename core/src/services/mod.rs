//! Business services containing domain logic and use cases.

pub mod account;
pub mod mail;
pub mod password;
pub mod registration;
pub mod session;
pub mod signing;

// Re-export commonly used types
pub use account::{AccountService, AccountServiceConfig};
pub use mail::{EmailMessage, MailerTrait};
pub use registration::{RegistrationService, RegistrationServiceConfig};
pub use session::{AccessTokenVerifier, SessionService};
pub use signing::{ActivationCodec, Clock, FixedClock, PasswordResetCodec, SystemClock, TimestampSigner};
