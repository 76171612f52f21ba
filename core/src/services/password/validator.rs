//! Rules a new password has to satisfy

use crate::errors::ValidationError;

/// Minimum number of characters in a password
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Local parts shorter than this are not compared against the password
const MIN_SIMILARITY_LENGTH: usize = 3;

static COMMON_PASSWORDS: &[&str] = &[
    "123456", "12345678", "123456789", "1234567890", "password", "password1",
    "password123", "qwerty", "qwerty123", "qwertyuiop", "abc123", "abcdef",
    "111111", "123123", "iloveyou", "admin", "admin123", "welcome", "welcome1",
    "letmein", "monkey", "dragon", "football", "baseball", "sunshine",
    "princess", "starwars", "trustno1", "passw0rd", "master", "superman",
    "1q2w3e4r", "zaq12wsx", "changeme", "secret", "whatever", "freedom",
];

/// Validate a new password and its confirmation
///
/// Checks run in a fixed order and the first failing rule is returned.
pub fn validate_new_password(
    password: &str,
    confirmation: &str,
    email: &str,
) -> Result<(), ValidationError> {
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LENGTH,
        });
    }

    if password.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::PasswordEntirelyNumeric);
    }

    if is_similar_to_email(password, email) {
        return Err(ValidationError::PasswordTooSimilar);
    }

    let lowered = password.to_lowercase();
    if COMMON_PASSWORDS.contains(&lowered.as_str()) {
        return Err(ValidationError::PasswordTooCommon);
    }

    Ok(())
}

fn is_similar_to_email(password: &str, email: &str) -> bool {
    let local = email
        .split_once('@')
        .map(|(local, _)| local)
        .unwrap_or(email)
        .to_lowercase();
    if local.chars().count() < MIN_SIMILARITY_LENGTH {
        return false;
    }

    let password = password.to_lowercase();
    password.contains(&local) || local.contains(&password)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMAIL: &str = "jane.doe@example.com";

    #[test]
    fn test_valid_password() {
        assert_eq!(validate_new_password("tr0ub4dor&3", "tr0ub4dor&3", EMAIL), Ok(()));
    }

    #[test]
    fn test_mismatch_is_reported_first() {
        assert_eq!(
            validate_new_password("123", "456", EMAIL),
            Err(ValidationError::PasswordMismatch)
        );
    }

    #[test]
    fn test_too_short() {
        assert_eq!(
            validate_new_password("aB3$x", "aB3$x", EMAIL),
            Err(ValidationError::PasswordTooShort { min: 8 })
        );
    }

    #[test]
    fn test_entirely_numeric() {
        assert_eq!(
            validate_new_password("90817263", "90817263", EMAIL),
            Err(ValidationError::PasswordEntirelyNumeric)
        );
    }

    #[test]
    fn test_similar_to_email() {
        assert_eq!(
            validate_new_password("Jane.Doe2024", "Jane.Doe2024", EMAIL),
            Err(ValidationError::PasswordTooSimilar)
        );
        // short local parts are ignored
        assert_eq!(
            validate_new_password("xy-harbour-7", "xy-harbour-7", "xy@example.com"),
            Ok(())
        );
    }

    #[test]
    fn test_common_password() {
        assert_eq!(
            validate_new_password("Password123", "Password123", EMAIL),
            Err(ValidationError::PasswordTooCommon)
        );
    }
}
