//! Authentication configuration

use serde::{Deserialize, Serialize};

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Identity token expiry time in seconds
    pub id_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from("development-secret-change-in-production"),
            access_token_expiry: 900,        // 15 minutes
            id_token_expiry: 900,            // 15 minutes
            refresh_token_expiry: 2_592_000, // 30 days
            issuer: String::from("credo"),
            audience: String::from("credo-api"),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with an explicit secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access and identity token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self.id_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86_400;
        self
    }

    /// Check if the default secret is still in use (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == "development-secret-change-in-production"
    }
}

/// One-time code configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Number of minutes before a code expires
    pub code_expiration_minutes: i64,

    /// Maximum number of verification attempts per code
    pub max_attempts: i32,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: 10,
            max_attempts: 5,
        }
    }
}

/// Password hashing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HashingConfig {
    /// bcrypt work factor
    pub cost: u32,
}

impl Default for HashingConfig {
    fn default() -> Self {
        // bcrypt::DEFAULT_COST, duplicated here so shared stays crypto-free
        Self { cost: 12 }
    }
}

impl HashingConfig {
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_defaults() {
        let config = JwtConfig::default();

        assert_eq!(config.access_token_expiry, 900);
        assert_eq!(config.refresh_token_expiry, 30 * 86_400);
        assert_eq!(config.issuer, "credo");
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_jwt_config_builders() {
        let config = JwtConfig::new("s3cret")
            .with_access_expiry_minutes(5)
            .with_refresh_expiry_days(7);

        assert_eq!(config.access_token_expiry, 300);
        assert_eq!(config.id_token_expiry, 300);
        assert_eq!(config.refresh_token_expiry, 7 * 86_400);
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_otp_config_defaults() {
        let config = OtpConfig::default();

        assert_eq!(config.code_expiration_minutes, 10);
        assert_eq!(config.max_attempts, 5);
    }
}
