//! Auth event entity for the append-only audit collaborator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Semantic event types emitted by the credential engine
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuthEventType {
    // OTP events
    OtpIssued,
    OtpVerified,
    OtpVerificationFailed,

    // Signup events
    SignupSucceeded,
    SignupFailed,

    // Login events
    LoginSucceeded,
    LoginFailed,

    // Refresh token events
    TokenRefreshed,
    RefreshFailed,
    RefreshReused,

    // Session events
    Logout,
    AllSessionsRevoked,
}

impl AuthEventType {
    /// String representation for storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OtpIssued => "otp_issued",
            Self::OtpVerified => "otp_verified",
            Self::OtpVerificationFailed => "otp_verification_failed",
            Self::SignupSucceeded => "signup_succeeded",
            Self::SignupFailed => "signup_failed",
            Self::LoginSucceeded => "login_succeeded",
            Self::LoginFailed => "login_failed",
            Self::TokenRefreshed => "token_refreshed",
            Self::RefreshFailed => "refresh_failed",
            Self::RefreshReused => "refresh_reused",
            Self::Logout => "logout",
            Self::AllSessionsRevoked => "all_sessions_revoked",
        }
    }

    /// Parse from the stored string representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "otp_issued" => Some(Self::OtpIssued),
            "otp_verified" => Some(Self::OtpVerified),
            "otp_verification_failed" => Some(Self::OtpVerificationFailed),
            "signup_succeeded" => Some(Self::SignupSucceeded),
            "signup_failed" => Some(Self::SignupFailed),
            "login_succeeded" => Some(Self::LoginSucceeded),
            "login_failed" => Some(Self::LoginFailed),
            "token_refreshed" => Some(Self::TokenRefreshed),
            "refresh_failed" => Some(Self::RefreshFailed),
            "refresh_reused" => Some(Self::RefreshReused),
            "logout" => Some(Self::Logout),
            "all_sessions_revoked" => Some(Self::AllSessionsRevoked),
            _ => None,
        }
    }

    /// Whether this event records a security incident
    pub fn is_security_event(&self) -> bool {
        matches!(self, Self::RefreshReused)
    }
}

/// An audit record handed to the event-log collaborator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthEvent {
    /// Unique identifier for the event
    pub id: Uuid,

    /// User involved, if known (None for anonymous actions)
    pub user_id: Option<Uuid>,

    /// Type of event
    pub event_type: AuthEventType,

    /// Structured context; already passed through the redaction boundary
    pub payload: JsonValue,

    /// Timestamp when the event occurred
    pub created_at: DateTime<Utc>,
}

impl AuthEvent {
    /// Creates a new event
    pub fn new(event_type: AuthEventType, user_id: Option<Uuid>, payload: JsonValue) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            event_type,
            payload,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_type_round_trip() {
        for event_type in [
            AuthEventType::OtpIssued,
            AuthEventType::SignupSucceeded,
            AuthEventType::LoginFailed,
            AuthEventType::RefreshReused,
            AuthEventType::AllSessionsRevoked,
        ] {
            assert_eq!(AuthEventType::parse(event_type.as_str()), Some(event_type));
        }
        assert_eq!(AuthEventType::parse("unknown_event"), None);
    }

    #[test]
    fn test_security_classification() {
        assert!(AuthEventType::RefreshReused.is_security_event());
        assert!(!AuthEventType::LoginSucceeded.is_security_event());
    }

    #[test]
    fn test_event_creation() {
        let user_id = Uuid::new_v4();
        let event = AuthEvent::new(
            AuthEventType::LoginSucceeded,
            Some(user_id),
            json!({ "email": "alice@example.com" }),
        );

        assert_eq!(event.user_id, Some(user_id));
        assert_eq!(event.event_type, AuthEventType::LoginSucceeded);
        assert_eq!(event.payload["email"], "alice@example.com");
    }
}
