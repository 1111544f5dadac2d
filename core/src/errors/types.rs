//! Error type definitions for credential, code, and token operations
//!
//! Messages stay stable and generic: credential failures never reveal
//! which half of a login was wrong.

use thiserror::Error;

/// Authentication flow errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("Email already registered")]
    EmailTaken,

    #[error("Email not verified")]
    EmailNotVerified,

    /// Deliberately covers "no such user", "no password set", and
    /// "wrong password" to prevent user enumeration
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,
}

/// One-time code errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum OtpError {
    #[error("Verification code not found")]
    NotFound,

    #[error("Verification code already used")]
    AlreadyConsumed,

    #[error("Verification code expired")]
    Expired,

    #[error("Invalid verification code")]
    InvalidCode,

    #[error("Maximum verification attempts exceeded")]
    TooManyAttempts,
}

/// Signed and refresh token errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed token")]
    Malformed,

    #[error("Token signature verification failed")]
    SignatureInvalid,

    #[error("Token expired")]
    Expired,

    #[error("Token used for the wrong purpose")]
    WrongPurpose,

    #[error("Refresh token not found")]
    NotFound,

    #[error("Refresh token revoked")]
    Revoked,

    /// A revoked-and-rotated token was presented again; treated as
    /// evidence of theft
    #[error("Refresh token reuse detected")]
    ReuseDetected,

    #[error("Token generation failed")]
    GenerationFailed,
}

/// Input validation errors, rejected before touching storage
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Password must be between {min} and {max} characters")]
    PasswordLength { min: usize, max: usize },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },
}
