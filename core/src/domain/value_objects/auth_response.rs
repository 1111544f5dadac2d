//! Authentication response value object.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::token::TokenSet;
use crate::domain::entities::user::User;

/// Response returned after successful login or refresh
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    /// Subject the tokens were minted for
    pub user_id: Uuid,

    /// Email address of the subject
    pub email: String,

    /// Signed access token for API authentication
    pub access_token: String,

    /// Signed identity token carrying profile claims
    pub id_token: String,

    /// Opaque refresh token; shown exactly once, never retrievable again
    pub refresh_token: String,

    /// Access token expiration time in seconds
    pub expires_in: i64,

    /// Refresh token expiration time in seconds
    pub refresh_expires_in: i64,
}

impl AuthResponse {
    /// Builds a response from a minted token set and its subject
    pub fn from_token_set(token_set: TokenSet, user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            access_token: token_set.access_token,
            id_token: token_set.id_token,
            refresh_token: token_set.refresh_token,
            expires_in: token_set.access_expires_in,
            refresh_expires_in: token_set.refresh_expires_in,
        }
    }
}
