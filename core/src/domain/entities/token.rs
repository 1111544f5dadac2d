//! Token entities for signed access/identity tokens and rotating
//! refresh tokens.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access token expiration time (15 minutes)
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 15;

/// Identity token expiration time (15 minutes)
pub const ID_TOKEN_EXPIRY_MINUTES: i64 = 15;

/// Refresh token expiration time (30 days)
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 30;

/// Purpose discriminator embedded in every signed token
///
/// An access token is never accepted where an identity token is required
/// and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenPurpose {
    #[serde(rename = "access")]
    Access,
    #[serde(rename = "id")]
    Identity,
}

impl TokenPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Identity => "id",
        }
    }
}

/// Claims structure for signed token payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// Unique identifier for this token
    pub jti: String,

    /// Purpose discriminator: `access` or `id`
    pub typ: TokenPurpose,

    /// Email address, identity tokens only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Display name, identity tokens only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Claims {
    fn base(user_id: Uuid, purpose: TokenPurpose, ttl: Duration, iss: &str, aud: &str) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            nbf: now.timestamp(),
            iss: iss.to_string(),
            aud: aud.to_string(),
            jti: Uuid::new_v4().to_string(),
            typ: purpose,
            email: None,
            name: None,
        }
    }

    /// Creates claims for an access token
    pub fn new_access(user_id: Uuid, ttl: Duration, iss: &str, aud: &str) -> Self {
        Self::base(user_id, TokenPurpose::Access, ttl, iss, aud)
    }

    /// Creates claims for an identity token carrying profile data
    pub fn new_identity(
        user_id: Uuid,
        email: String,
        name: Option<String>,
        ttl: Duration,
        iss: &str,
        aud: &str,
    ) -> Self {
        let mut claims = Self::base(user_id, TokenPurpose::Identity, ttl, iss, aud);
        claims.email = Some(email);
        claims.name = name;
        claims
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Gets the user ID from the subject claim
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Request context captured alongside a refresh token
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    /// User agent string from the request, if known
    pub user_agent: Option<String>,

    /// Client IP address, if known
    pub ip_addr: Option<String>,
}

impl SessionContext {
    pub fn new(user_agent: Option<String>, ip_addr: Option<String>) -> Self {
        Self { user_agent, ip_addr }
    }
}

/// Refresh token record as persisted
///
/// Only the digest of the opaque token is stored. `replaced_by` links each
/// record to the token that superseded it, forming the rotation chain used
/// for reuse detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Unique identifier for the refresh token record
    pub id: Uuid,

    /// User this token belongs to
    pub user_id: Uuid,

    /// SHA-256 digest of the opaque token, hex encoded
    pub token_hash: String,

    /// User agent captured at issuance
    pub user_agent: Option<String>,

    /// Client IP captured at issuance
    pub ip_addr: Option<String>,

    /// Timestamp when the token was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,

    /// Whether the token has been revoked
    pub revoked: bool,

    /// Id of the token that superseded this one, set on rotation
    pub replaced_by: Option<Uuid>,
}

impl RefreshToken {
    /// Creates a new refresh token record
    pub fn new(user_id: Uuid, token_hash: String, context: SessionContext) -> Self {
        Self::new_with_ttl_days(user_id, token_hash, context, REFRESH_TOKEN_EXPIRY_DAYS)
    }

    /// Creates a new refresh token record with a custom time-to-live
    pub fn new_with_ttl_days(
        user_id: Uuid,
        token_hash: String,
        context: SessionContext,
        ttl_days: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            token_hash,
            user_agent: context.user_agent,
            ip_addr: context.ip_addr,
            created_at: now,
            expires_at: now + Duration::days(ttl_days),
            revoked: false,
            replaced_by: None,
        }
    }

    /// Checks if the token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// A token is usable iff it is neither revoked nor expired
    pub fn is_usable(&self) -> bool {
        !self.revoked && !self.is_expired()
    }

    /// Revokes the token without a successor (logout)
    pub fn revoke(&mut self) {
        self.revoked = true;
    }

    /// Revokes the token and links its replacement (rotation)
    pub fn supersede(&mut self, replacement_id: Uuid) {
        self.revoked = true;
        self.replaced_by = Some(replacement_id);
    }

    /// Whether presenting this token again is evidence of reuse: it was
    /// revoked by a rotation that produced a successor
    pub fn was_rotated(&self) -> bool {
        self.revoked && self.replaced_by.is_some()
    }
}

/// Token set returned to the client after login or refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSet {
    /// Signed access token
    pub access_token: String,

    /// Signed identity token
    pub id_token: String,

    /// Opaque refresh token, returned exactly once
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub access_expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,
}

impl TokenSet {
    /// Creates a new token set with expiry windows in seconds
    pub fn new(
        access_token: String,
        id_token: String,
        refresh_token: String,
        access_expires_in: i64,
        refresh_expires_in: i64,
    ) -> Self {
        Self {
            access_token,
            id_token,
            refresh_token,
            access_expires_in,
            refresh_expires_in,
        }
    }
}
