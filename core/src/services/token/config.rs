//! Configuration for the token services

use crate::domain::entities::token::{
    ACCESS_TOKEN_EXPIRY_MINUTES, ID_TOKEN_EXPIRY_MINUTES, REFRESH_TOKEN_EXPIRY_DAYS,
};

/// Configuration for signing and refresh token management
///
/// The signing secret is process-wide configuration loaded once at
/// startup; rotating it invalidates all outstanding signed tokens, which
/// is acceptable given their short TTLs.
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// HMAC signing secret
    pub jwt_secret: String,
    /// Issuer claim stamped into and required of every signed token
    pub issuer: String,
    /// Audience claim stamped into and required of every signed token
    pub audience: String,
    /// Access token expiry in minutes
    pub access_token_expiry_minutes: i64,
    /// Identity token expiry in minutes
    pub id_token_expiry_minutes: i64,
    /// Refresh token expiry in days
    pub refresh_token_expiry_days: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-change-in-production".to_string(),
            issuer: "credo".to_string(),
            audience: "credo-api".to_string(),
            access_token_expiry_minutes: ACCESS_TOKEN_EXPIRY_MINUTES,
            id_token_expiry_minutes: ID_TOKEN_EXPIRY_MINUTES,
            refresh_token_expiry_days: REFRESH_TOKEN_EXPIRY_DAYS,
        }
    }
}

impl From<&credo_shared::config::JwtConfig> for TokenServiceConfig {
    fn from(config: &credo_shared::config::JwtConfig) -> Self {
        Self {
            jwt_secret: config.secret.clone(),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            access_token_expiry_minutes: config.access_token_expiry / 60,
            id_token_expiry_minutes: config.id_token_expiry / 60,
            refresh_token_expiry_days: config.refresh_token_expiry / 86_400,
        }
    }
}
