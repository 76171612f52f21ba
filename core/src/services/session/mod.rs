//! JWT session tokens issued at login

mod service;


pub use service::{AccessTokenVerifier, SessionService};
