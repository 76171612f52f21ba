//! Email validation and normalization helpers

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$")
        .expect("email regex is valid")
});

/// Maximum accepted length of an email address
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Check whether an email address is syntactically valid
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= MAX_EMAIL_LENGTH && EMAIL_REGEX.is_match(email)
}

/// Normalize an email address by trimming it and lower-casing the domain part.
///
/// The local part is left untouched since it is case sensitive.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

/// Mask an email address for logging, keeping the first character of the
/// local part and the full domain.
///
/// ```
/// use reg_shared::utils::validation::mask_email;
/// assert_eq!(mask_email("alice@example.com"), "a****@example.com");
/// ```
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let mut chars = local.chars();
            match chars.next() {
                Some(first) => format!("{}{}@{}", first, "*".repeat(chars.count()), domain),
                None => format!("@{}", domain),
            }
        }
        None => "*".repeat(email.chars().count()),
    }
}
