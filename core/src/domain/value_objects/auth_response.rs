//! Authentication response value object for API responses.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authentication response returned after a successful login
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    /// JWT access token for API authentication
    pub access_token: String,

    /// Always "Bearer"
    pub token_type: String,

    /// Access token expiration time in seconds
    pub expires_in: i64,

    /// Authenticated user
    pub user_id: Uuid,
}

impl AuthResponse {
    /// Creates a new bearer authentication response
    pub fn bearer(access_token: String, expires_in: i64, user_id: Uuid) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user_id,
        }
    }
}
