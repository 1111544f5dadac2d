//! bcrypt-backed password hasher.

use crate::errors::{DomainError, DomainResult};

/// Configuration for the password hasher
#[derive(Debug, Clone)]
pub struct PasswordHasherConfig {
    /// bcrypt work factor
    pub cost: u32,
}

impl Default for PasswordHasherConfig {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl From<&credo_shared::config::HashingConfig> for PasswordHasherConfig {
    fn from(config: &credo_shared::config::HashingConfig) -> Self {
        Self { cost: config.cost }
    }
}

/// Service for hashing and verifying login passwords
///
/// The bcrypt work is CPU-bound by design, so both operations run on the
/// blocking thread pool rather than the async runtime's workers.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    config: PasswordHasherConfig,
}

impl PasswordHasher {
    pub fn new(config: PasswordHasherConfig) -> Self {
        Self { config }
    }

    /// Hashes a password into a self-describing digest
    pub async fn hash(&self, password: &str) -> DomainResult<String> {
        let password = password.to_string();
        let cost = self.config.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("hashing task failed: {e}"),
            })?
            .map_err(|e| DomainError::Internal {
                message: format!("password hashing failed: {e}"),
            })
    }

    /// Verifies a password against a stored digest
    ///
    /// A malformed digest verifies as `false`; it never surfaces as an
    /// error to the caller.
    pub async fn verify(&self, password: &str, digest: &str) -> DomainResult<bool> {
        let password = password.to_string();
        let digest = digest.to_string();

        let matched = tokio::task::spawn_blocking(move || bcrypt::verify(password, &digest))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("verification task failed: {e}"),
            })?
            .unwrap_or(false);

        Ok(matched)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(PasswordHasherConfig::default())
    }
}
