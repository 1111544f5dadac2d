//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum accepted password length (bcrypt truncates past 72 bytes)
pub const MAX_PASSWORD_LENGTH: usize = 72;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

/// Check if an email address has a plausible shape
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= 255 && EMAIL_PATTERN.is_match(email)
}

/// Normalize an email for storage and lookup (emails are case-insensitive)
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

/// Check password length bounds
pub fn is_valid_password(password: &str) -> bool {
    let len = password.len();
    (MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&len)
}

/// Check if a string is not empty after trimming
pub fn not_empty(value: &str) -> bool {
    !value.trim().is_empty()
}
