//! User entity representing a registered account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity representing a registered account
///
/// The email is globally unique and stored lowercase. `password_hash` is
/// absent until signup completes and is never serialized into responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Email address, lowercase, globally unique
    pub email: String,

    /// Whether the email address has been verified via OTP
    pub email_verified: bool,

    /// Optional display name
    pub full_name: Option<String>,

    /// bcrypt digest of the password; None until signup completes
    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with a verified email and password hash,
    /// as produced by the signup flow
    pub fn new(email: String, password_hash: String, full_name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            email_verified: true,
            full_name,
            password_hash: Some(password_hash),
            created_at: now,
            updated_at: now,
        }
    }

}
