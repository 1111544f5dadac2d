//! Configuration for the one-time code service

use crate::domain::entities::otp::{DEFAULT_CODE_TTL_MINUTES, MAX_ATTEMPTS};

/// Configuration for the one-time code service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Number of minutes before a code expires
    pub code_expiration_minutes: i64,
    /// Maximum number of verification attempts per code
    pub max_attempts: i32,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: DEFAULT_CODE_TTL_MINUTES,
            max_attempts: MAX_ATTEMPTS,
        }
    }
}

impl From<&credo_shared::config::OtpConfig> for OtpServiceConfig {
    fn from(config: &credo_shared::config::OtpConfig) -> Self {
        Self {
            code_expiration_minutes: config.code_expiration_minutes,
            max_attempts: config.max_attempts,
        }
    }
}
