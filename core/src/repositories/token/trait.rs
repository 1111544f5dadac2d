//! Refresh token repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

/// Repository trait for RefreshToken persistence operations
///
/// `rotate` is the critical operation: it must revoke the old record, link
/// its `replaced_by` pointer, and insert the replacement as one atomic
/// unit, conditional on the old record still being unrevoked. Competing
/// redemptions of the same token must yield exactly one winner.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Persist a new refresh token record
    async fn save(&self, token: RefreshToken) -> Result<RefreshToken, DomainError>;

    /// Find a refresh token by its digest
    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError>;

    /// Find a refresh token by its id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<RefreshToken>, DomainError>;

    /// Find all usable (unrevoked, unexpired) tokens for a user
    async fn find_active_by_user(&self, user_id: Uuid) -> Result<Vec<RefreshToken>, DomainError>;

    /// Atomically rotate `old_id` into `replacement`
    ///
    /// Marks the old record revoked, sets its `replaced_by` to the
    /// replacement's id, and inserts the replacement. The whole unit
    /// applies only if the old record is still unrevoked.
    ///
    /// # Returns
    /// * `Ok(true)` - This call won the rotation
    /// * `Ok(false)` - The old record was already revoked or missing;
    ///   nothing was written
    async fn rotate(&self, old_id: Uuid, replacement: RefreshToken)
        -> Result<bool, DomainError>;

    /// Revoke a single token by id
    ///
    /// # Returns
    /// * `Ok(true)` - Token was revoked by this call
    /// * `Ok(false)` - Token missing or already revoked
    async fn revoke(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Revoke every unrevoked token belonging to a user
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of tokens revoked
    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<usize, DomainError>;

    /// Revoke the rotation chain reachable from `start_id` through
    /// `replaced_by` pointers
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of tokens newly revoked
    async fn revoke_chain(&self, start_id: Uuid) -> Result<usize, DomainError>;

    /// Delete expired token records (retention/cleanup policy)
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records deleted
    async fn delete_expired(&self) -> Result<usize, DomainError>;
}
