//! In-memory implementation of AuthEventRepository.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::auth_event::AuthEvent;
use crate::errors::DomainError;

use super::r#trait::AuthEventRepository;

/// In-memory append-only event log
pub struct InMemoryAuthEventRepository {
    events: Arc<RwLock<Vec<AuthEvent>>>,
}

impl InMemoryAuthEventRepository {
    pub fn new() -> Self {
        Self {
            events: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Snapshot of all recorded events, oldest first
    pub async fn all(&self) -> Vec<AuthEvent> {
        self.events.read().await.clone()
    }
}

impl Default for InMemoryAuthEventRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthEventRepository for InMemoryAuthEventRepository {
    async fn record(&self, event: &AuthEvent) -> Result<(), DomainError> {
        self.events.write().await.push(event.clone());
        Ok(())
    }

    async fn find_latest_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<AuthEvent>, DomainError> {
        let events = self.events.read().await;
        Ok(events
            .iter()
            .filter(|e| e.user_id == Some(user_id))
            .max_by_key(|e| e.created_at)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::auth_event::AuthEventType;
    use serde_json::json;

    #[tokio::test]
    async fn test_record_and_query_latest() {
        let repo = InMemoryAuthEventRepository::new();
        let user_id = Uuid::new_v4();

        let mut older = AuthEvent::new(AuthEventType::LoginSucceeded, Some(user_id), json!({}));
        older.created_at = older.created_at - chrono::Duration::seconds(5);
        repo.record(&older).await.unwrap();

        let newer = AuthEvent::new(AuthEventType::Logout, Some(user_id), json!({}));
        repo.record(&newer).await.unwrap();

        let latest = repo.find_latest_by_user(user_id).await.unwrap().unwrap();
        assert_eq!(latest.event_type, AuthEventType::Logout);
        assert_eq!(repo.all().await.len(), 2);
    }
}
