//! Type definitions shared between the core and API layers
//!
//! - `response` - API response wrappers and error bodies

pub mod response;

pub use response::{ApiResponse, ErrorResponse, MessageResponse};
