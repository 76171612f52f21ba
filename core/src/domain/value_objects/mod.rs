//! Value objects: immutable data passed between services and the API layer.

pub mod auth_response;
pub mod site;

pub use auth_response::AuthResponse;
pub use site::{SiteContext, ACTIVATION_PATH, PASSWORD_RESET_PATH};
