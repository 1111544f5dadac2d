//! Auth event repository trait for the append-only event log collaborator.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::auth_event::AuthEvent;
use crate::errors::DomainError;

/// Repository trait for the append-only auth event log
///
/// Writes are best-effort from the engine's point of view: the event
/// service logs and swallows failures so the primary flow never fails on
/// an audit write.
#[async_trait]
pub trait AuthEventRepository: Send + Sync {
    /// Append an event
    async fn record(&self, event: &AuthEvent) -> Result<(), DomainError>;

    /// Fetch the most recent event for a user, if any
    async fn find_latest_by_user(&self, user_id: Uuid)
        -> Result<Option<AuthEvent>, DomainError>;
}
