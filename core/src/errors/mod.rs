//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, OtpError, TokenError, ValidationError};

use thiserror::Error;

/// Umbrella error for the domain layer
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Otp(#[from] OtpError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Whether this failure should trigger defensive revocation and a
    /// security event rather than a plain rejection
    pub fn is_security_event(&self) -> bool {
        matches!(
            self,
            DomainError::Token(TokenError::ReuseDetected)
                | DomainError::Otp(OtpError::TooManyAttempts)
        )
    }
}
