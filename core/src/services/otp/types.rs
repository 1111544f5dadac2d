//! Result types for the one-time code service

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Result of issuing a verification code
///
/// The raw code itself is handed only to the delivery collaborator and
/// never appears here.
#[derive(Debug, Clone)]
pub struct IssueCodeResult {
    /// Id of the persisted code record
    pub code_id: Uuid,
    /// When the code expires
    pub expires_at: DateTime<Utc>,
    /// Provider message id from the delivery collaborator; `None` when
    /// delivery failed (the failure is logged, not retried)
    pub message_id: Option<String>,
}
