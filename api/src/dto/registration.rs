use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use reg_core::domain::entities::User;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email, length(max = 254))]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
    #[validate(length(min = 1, max = 128))]
    pub password_confirmation: String,
}

/// Returned once the account is stored and the activation mail handed off
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub email: String,
    pub status: String, // always "pending_activation"
    pub message: String,
}

impl RegisterResponse {
    pub fn pending(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            status: "pending_activation".to_string(),
            message: format!(
                "An activation link has been sent to {}. Follow it to activate the account.",
                user.email
            ),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivationResponse {
    pub user_id: Uuid,
    pub email: String,
    pub is_active: bool,
    pub activated_at: DateTime<Utc>,
    pub message: String,
}

impl From<&User> for ActivationResponse {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            is_active: user.is_active,
            activated_at: user.updated_at,
            message: "Your account is now active. You may log in.".to_string(),
        }
    }
}
