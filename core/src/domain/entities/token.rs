//! Claims carried by JWT session tokens.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT issuer
pub const JWT_ISSUER: &str = "registra";

/// JWT audience
pub const JWT_AUDIENCE: &str = "registra-api";

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Email of the authenticated user
    pub email: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID, used to revoke a single session on logout
    pub jti: String,
}

impl Claims {
    /// Creates claims for an access token valid for `expiry_seconds`
    pub fn new_access_token(
        user_id: Uuid,
        email: String,
        issuer: &str,
        audience: &str,
        expiry_seconds: i64,
    ) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::seconds(expiry_seconds);

        Self {
            sub: user_id.to_string(),
            email,
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}
