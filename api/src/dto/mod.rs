pub mod account;
pub mod error;
pub mod registration;

pub use account::*;
pub use error::*;
pub use registration::*;
