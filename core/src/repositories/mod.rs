//! Repository interfaces for persistence, plus in-memory implementations
//! used by tests and by the development server when no database is set up.

pub mod token;
pub mod user;

pub use token::{InMemoryTokenRepository, TokenRepository};
pub use user::{InMemoryUserRepository, UserRepository};
