//! User entity representing a registered account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of an account as seen by the activation flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountState {
    /// Registered, waiting for the emailed activation link to be visited
    PendingActivation,
    /// Email ownership confirmed; the account can authenticate
    Active,
}

/// User entity representing a registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Email address, unique among active users
    pub email: String,

    /// bcrypt hash of the password
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Whether the account has been activated through the emailed link
    pub is_active: bool,

    pub first_name: String,

    pub last_name: String,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,

    /// Timestamp of the user's last login
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Creates a new, inactive user
    pub fn new(email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            is_active: false,
            first_name: String::new(),
            last_name: String::new(),
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> AccountState {
        if self.is_active {
            AccountState::Active
        } else {
            AccountState::PendingActivation
        }
    }

    /// Marks the account as active
    pub fn activate(&mut self) {
        self.is_active = true;
        self.updated_at = Utc::now();
    }

    /// Replaces the stored password hash
    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    /// Updates the profile names
    pub fn set_names(&mut self, first_name: String, last_name: String) {
        self.first_name = first_name;
        self.last_name = last_name;
        self.updated_at = Utc::now();
    }

    /// Updates the last login timestamp
    pub fn update_last_login(&mut self) {
        self.last_login_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }

    /// Full name, or the email when no name has been set
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.email.clone()
        } else {
            full.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User::new("u@example.com".to_string(), "$2b$04$hash".to_string())
    }

    #[test]
    fn test_new_user_is_pending() {
        let user = user();
        assert!(!user.is_active);
        assert_eq!(user.state(), AccountState::PendingActivation);
        assert!(user.last_login_at.is_none());
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_new_users_get_distinct_ids() {
        assert_ne!(user().id, user().id);
    }

    #[test]
    fn test_activate() {
        let mut user = user();
        user.activate();
        assert!(user.is_active);
        assert_eq!(user.state(), AccountState::Active);
    }

    #[test]
    fn test_display_name() {
        let mut user = user();
        assert_eq!(user.display_name(), "u@example.com");
        user.set_names("Ada".to_string(), "Lovelace".to_string());
        assert_eq!(user.display_name(), "Ada Lovelace");
        user.set_names("Ada".to_string(), String::new());
        assert_eq!(user.display_name(), "Ada");
    }

    #[test]
    fn test_password_hash_is_not_serialized() {
        let json = serde_json::to_value(user()).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "u@example.com");
    }
}
