//! Service for the append-only auth event log
//!
//! Event writes are best-effort: a failed append is logged and swallowed
//! so the flow that triggered it never fails on audit bookkeeping. Every
//! payload passes through the redaction boundary before it is stored.

use serde_json::Value as JsonValue;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::auth_event::{AuthEvent, AuthEventType};
use crate::errors::DomainResult;
use crate::repositories::AuthEventRepository;

/// Payload keys that must never reach the event log
const REDACTED_KEYS: &[&str] = &[
    "password",
    "password_hash",
    "otp",
    "code",
    "token",
    "secret",
    "access_token",
    "id_token",
    "refresh_token",
];

/// Records auth events against the event log collaborator
pub struct EventService<R: AuthEventRepository> {
    repository: Arc<R>,
}

impl<R: AuthEventRepository> EventService<R> {
    /// Creates a new event service
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Records an event, redacting sensitive payload keys first
    ///
    /// Never fails: append errors are logged and swallowed.
    pub async fn record(
        &self,
        event_type: AuthEventType,
        user_id: Option<Uuid>,
        payload: JsonValue,
    ) {
        let event = AuthEvent::new(event_type, user_id, redact_payload(payload));

        if let Err(err) = self.repository.record(&event).await {
            tracing::warn!(
                event = "auth_event_write_failed",
                event_type = event.event_type.as_str(),
                error = %err,
                "Failed to append auth event; continuing"
            );
        } else if event.event_type.is_security_event() {
            tracing::warn!(
                event = "security_event_recorded",
                event_type = event.event_type.as_str(),
                user_id = ?event.user_id,
                "Security-relevant auth event recorded"
            );
        }
    }

    /// Records an event on a detached task, returning immediately
    ///
    /// For flows that should not wait on the event log at all.
    pub fn record_detached(
        &self,
        event_type: AuthEventType,
        user_id: Option<Uuid>,
        payload: JsonValue,
    ) where
        R: 'static,
    {
        let repository = self.repository.clone();
        let event = AuthEvent::new(event_type, user_id, redact_payload(payload));

        tokio::spawn(async move {
            if let Err(err) = repository.record(&event).await {
                tracing::warn!(
                    event = "auth_event_write_failed",
                    event_type = event.event_type.as_str(),
                    error = %err,
                    "Failed to append auth event; continuing"
                );
            }
        });
    }

    /// Fetches the most recent event for a user
    pub async fn latest_for_user(&self, user_id: Uuid) -> DomainResult<Option<AuthEvent>> {
        self.repository.find_latest_by_user(user_id).await
    }
}

/// Strips secret-bearing keys from a payload, recursively
///
/// Values under a redacted key are replaced rather than dropped so the
/// stored event still shows the key was present.
fn redact_payload(payload: JsonValue) -> JsonValue {
    match payload {
        JsonValue::Object(map) => JsonValue::Object(
            map.into_iter()
                .map(|(key, value)| {
                    if REDACTED_KEYS.contains(&key.as_str()) {
                        (key, JsonValue::String("[redacted]".to_string()))
                    } else {
                        (key, redact_payload(value))
                    }
                })
                .collect(),
        ),
        JsonValue::Array(items) => {
            JsonValue::Array(items.into_iter().map(redact_payload).collect())
        }
        other => other,
    }
}
