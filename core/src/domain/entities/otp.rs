//! One-time code entity for email verification.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of verification attempts allowed per code
pub const MAX_ATTEMPTS: i32 = 5;

/// Length of the numeric code
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for codes (10 minutes)
pub const DEFAULT_CODE_TTL_MINUTES: i64 = 10;

/// What a one-time code proves control of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtpPurpose {
    /// Proving control of an email address before signup
    EmailVerification,
}

impl OtpPurpose {
    /// String representation for storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmailVerification => "email_verification",
        }
    }

    /// Parse from the stored string representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "email_verification" => Some(Self::EmailVerification),
            _ => None,
        }
    }
}

/// A one-time challenge bound to an email and a purpose
///
/// Only the salted digest of the code is ever stored. The record is
/// retained after consumption for audit; it is logically dead once
/// `consumed` is set or `expires_at` passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpCode {
    /// Unique identifier for the code record
    pub id: Uuid,

    /// Email address the code was issued for (lowercase)
    pub email: String,

    /// SHA-256 digest of `code || salt`, hex encoded
    pub otp_hash: String,

    /// Random per-code salt, hex encoded
    pub salt: String,

    /// What the code proves
    pub purpose: OtpPurpose,

    /// Number of failed verification attempts so far
    pub attempts: i32,

    /// Timestamp when the code was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,

    /// Whether the code has been successfully used
    pub consumed: bool,
}

impl OtpCode {
    /// Creates a new code record from an already-hashed code
    pub fn new(email: String, purpose: OtpPurpose, otp_hash: String, salt: String) -> Self {
        Self::new_with_ttl(email, purpose, otp_hash, salt, DEFAULT_CODE_TTL_MINUTES)
    }

    /// Creates a new code record with a custom time-to-live
    pub fn new_with_ttl(
        email: String,
        purpose: OtpPurpose,
        otp_hash: String,
        salt: String,
        ttl_minutes: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            otp_hash,
            salt,
            purpose,
            attempts: 0,
            created_at: now,
            expires_at: now + Duration::minutes(ttl_minutes),
            consumed: false,
        }
    }

    /// Checks if the code has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Checks if the attempt budget has been spent
    pub fn attempts_exhausted(&self, max_attempts: i32) -> bool {
        self.attempts >= max_attempts
    }

    /// A code is active while it is unconsumed, unexpired, and still has
    /// attempts left
    pub fn is_active(&self, max_attempts: i32) -> bool {
        !self.consumed && !self.is_expired() && !self.attempts_exhausted(max_attempts)
    }
}
