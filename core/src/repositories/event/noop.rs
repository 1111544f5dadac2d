//! No-op implementation of AuthEventRepository for deployments without an
//! event log.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::auth_event::AuthEvent;
use crate::errors::DomainError;

use super::r#trait::AuthEventRepository;

/// Discards every event
pub struct NoOpAuthEventRepository;

impl NoOpAuthEventRepository {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpAuthEventRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthEventRepository for NoOpAuthEventRepository {
    async fn record(&self, _event: &AuthEvent) -> Result<(), DomainError> {
        Ok(())
    }

    async fn find_latest_by_user(
        &self,
        _user_id: Uuid,
    ) -> Result<Option<AuthEvent>, DomainError> {
        Ok(None)
    }
}
