//! Main one-time code service implementation

use constant_time_eq::constant_time_eq;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use std::sync::Arc;

use credo_shared::utils::validation;

use crate::domain::entities::otp::{OtpCode, OtpPurpose, CODE_LENGTH};
use crate::errors::{DomainError, DomainResult, OtpError, ValidationError};
use crate::repositories::OtpRepository;

use super::config::OtpServiceConfig;
use super::traits::DeliveryServiceTrait;
use super::types::IssueCodeResult;

/// Service for issuing and verifying one-time email verification codes
pub struct OtpService<R: OtpRepository, D: DeliveryServiceTrait> {
    repository: Arc<R>,
    delivery: Arc<D>,
    config: OtpServiceConfig,
}

impl<R: OtpRepository, D: DeliveryServiceTrait> OtpService<R, D> {
    /// Create a new one-time code service
    pub fn new(repository: Arc<R>, delivery: Arc<D>, config: OtpServiceConfig) -> Self {
        Self {
            repository,
            delivery,
            config,
        }
    }

    /// Issue a verification code for an email address
    ///
    /// Prior unconsumed codes for the same (email, purpose) are deleted so
    /// only the newest code can ever verify. The raw code goes to the
    /// delivery collaborator and nowhere else; storage sees only the
    /// salted digest. Delivery is best-effort: a send failure is logged
    /// and reflected in `message_id`, not surfaced as an error.
    pub async fn issue(&self, email: &str, purpose: OtpPurpose) -> DomainResult<IssueCodeResult> {
        let email = validation::normalize_email(email);
        if !validation::is_valid_email(&email) {
            return Err(DomainError::ValidationErr(ValidationError::InvalidEmail));
        }

        let code = Self::generate_code();
        let salt = Self::generate_salt();
        let otp_hash = Self::hash_code(&code, &salt);

        let record = OtpCode::new_with_ttl(
            email.clone(),
            purpose,
            otp_hash,
            salt,
            self.config.code_expiration_minutes,
        );

        // Predecessor invalidation and insert happen as one unit, so a
        // concurrent verify never sees a gap with no code at all
        let (record, invalidated) = self.repository.save_replacing(record).await?;
        if invalidated > 0 {
            tracing::info!(
                email = %email,
                purpose = purpose.as_str(),
                invalidated,
                event = "otp_predecessors_invalidated",
                "Invalidated unconsumed codes in favor of the new one"
            );
        }

        tracing::info!(
            email = %email,
            purpose = purpose.as_str(),
            code_id = %record.id,
            event = "otp_generated",
            "Generated new verification code"
        );

        // Fire-and-forget: a delivery failure is logged, never retried,
        // and never unwinds the committed newest-wins replacement
        let message_id = match self.delivery.send_verification_code(&email, &code).await {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::error!(
                    email = %email,
                    error = %e,
                    event = "otp_delivery_failed",
                    "Failed to deliver verification code"
                );
                None
            }
        };

        Ok(IssueCodeResult {
            code_id: record.id,
            expires_at: record.expires_at,
            message_id,
        })
    }

    /// Verify a candidate code against the most recent record
    ///
    /// Verification is one-shot: a successful call consumes the code and a
    /// second call fails with `AlreadyConsumed`. Failed attempts are
    /// persisted even though the call errors, so the attempt ceiling holds
    /// across retries.
    pub async fn verify(
        &self,
        email: &str,
        purpose: OtpPurpose,
        candidate: &str,
    ) -> DomainResult<()> {
        let email = validation::normalize_email(email);

        // Malformed candidates are rejected before touching storage
        if candidate.len() != CODE_LENGTH || !candidate.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::Otp(OtpError::InvalidCode));
        }

        let record = self
            .repository
            .find_latest(&email, purpose)
            .await?
            .ok_or(DomainError::Otp(OtpError::NotFound))?;

        if record.consumed {
            return Err(DomainError::Otp(OtpError::AlreadyConsumed));
        }
        if record.is_expired() {
            return Err(DomainError::Otp(OtpError::Expired));
        }
        // The ceiling binds before any comparison, so a correct code past
        // the budget still fails
        if record.attempts_exhausted(self.config.max_attempts) {
            tracing::warn!(
                email = %email,
                code_id = %record.id,
                event = "otp_attempts_exhausted",
                "Verification attempted past the attempt ceiling"
            );
            return Err(DomainError::Otp(OtpError::TooManyAttempts));
        }

        let candidate_hash = Self::hash_code(candidate, &record.salt);
        if !constant_time_eq(candidate_hash.as_bytes(), record.otp_hash.as_bytes()) {
            let attempts = self.repository.increment_attempts(record.id).await?;
            tracing::warn!(
                email = %email,
                code_id = %record.id,
                attempts,
                event = "otp_verification_failed",
                "Verification code mismatch"
            );
            return Err(DomainError::Otp(OtpError::InvalidCode));
        }

        // Conditional consume; a concurrent winner makes this call lose
        if !self.repository.consume(record.id).await? {
            return Err(DomainError::Otp(OtpError::AlreadyConsumed));
        }

        tracing::info!(
            email = %email,
            code_id = %record.id,
            event = "otp_verified",
            "Verification code accepted"
        );

        Ok(())
    }

    /// Whether the most recent code for (email, purpose) has been consumed
    ///
    /// Used as the signup precondition: a consumed email-verification code
    /// proves control of the address.
    pub async fn latest_is_consumed(&self, email: &str, purpose: OtpPurpose) -> DomainResult<bool> {
        let email = validation::normalize_email(email);
        Ok(self
            .repository
            .find_latest(&email, purpose)
            .await?
            .map(|record| record.consumed)
            .unwrap_or(false))
    }

    /// Generates a uniform 6-digit code using the OS CSPRNG
    fn generate_code() -> String {
        let mut rng = OsRng;
        // rejection sampling keeps the distribution uniform over 10^6
        let bound = u32::MAX - (u32::MAX % 1_000_000);
        loop {
            let mut bytes = [0u8; 4];
            rng.fill_bytes(&mut bytes);
            let num = u32::from_le_bytes(bytes);
            if num < bound {
                return format!("{:06}", num % 1_000_000);
            }
        }
    }

    /// Generates a fresh 16-byte salt, hex encoded
    fn generate_salt() -> String {
        let mut bytes = [0u8; 16];
        OsRng.fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    /// Digest of `code || salt`
    pub(crate) fn hash_code(code: &str, salt: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(code.as_bytes());
        hasher.update(salt.as_bytes());
        hex::encode(hasher.finalize())
    }
}
