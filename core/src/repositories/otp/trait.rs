//! One-time code repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::otp::{OtpCode, OtpPurpose};
use crate::errors::DomainError;

/// Repository trait for OtpCode persistence operations
///
/// Three operations carry concurrency obligations:
/// - `save_replacing` performs the newest-wins "invalidate old, insert
///   new" sequence as one atomic unit; partial application (old deleted
///   but new not inserted) must be impossible
/// - `consume` must be a conditional update on `consumed = false` so that
///   of two racing verifications exactly one converts the code
/// - `increment_attempts` persists even when the surrounding verification
///   fails, so the attempt ceiling holds across retries
#[async_trait]
pub trait OtpRepository: Send + Sync {
    /// Persist a new code record
    async fn save(&self, code: OtpCode) -> Result<OtpCode, DomainError>;

    /// Fetch the most recently created record for (email, purpose),
    /// consumed or not
    async fn find_latest(
        &self,
        email: &str,
        purpose: OtpPurpose,
    ) -> Result<Option<OtpCode>, DomainError>;

    /// Atomically delete all unconsumed records for the new record's
    /// (email, purpose) and insert it, enforcing the newest-wins issuance
    /// policy. Consumed records are retained for audit.
    ///
    /// # Returns
    /// * `Ok((OtpCode, usize))` - The stored record and the number of
    ///   prior codes invalidated
    async fn save_replacing(&self, code: OtpCode) -> Result<(OtpCode, usize), DomainError>;

    /// Mark a code consumed iff it is not already consumed
    ///
    /// # Returns
    /// * `Ok(true)` - This call performed the consume
    /// * `Ok(false)` - The code was already consumed (or does not exist)
    async fn consume(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Increment the failed-attempt counter
    ///
    /// # Returns
    /// * `Ok(i32)` - The new attempt count
    async fn increment_attempts(&self, id: Uuid) -> Result<i32, DomainError>;
}
