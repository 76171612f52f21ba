//! Password hashing and strength validation

mod hashing;
mod validator;

pub use hashing::{hash_password, hash_password_blocking, verify_password, verify_password_blocking};
pub use validator::{validate_new_password, MIN_PASSWORD_LENGTH};
