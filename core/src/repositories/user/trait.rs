//! User repository trait defining the interface for user persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Backends must enforce a unique constraint on the email column; lookups
/// receive already-normalized (lowercase) emails from the service layer.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The persisted user
    /// * `Err(DomainError::Auth(AuthError::EmailTaken))` - A user with the
    ///   same email already exists
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Find a user by normalized email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Persist changes to an existing user
    ///
    /// # Returns
    /// * `Ok(User)` - The updated user
    /// * `Err(DomainError::Auth(AuthError::UserNotFound))` - No such user
    async fn update(&self, user: User) -> Result<User, DomainError>;
}
