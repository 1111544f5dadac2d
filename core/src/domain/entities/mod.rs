//! Domain entities representing core business objects.

pub mod auth_event;
pub mod otp;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use auth_event::{AuthEvent, AuthEventType};
pub use otp::{OtpCode, OtpPurpose, CODE_LENGTH, DEFAULT_CODE_TTL_MINUTES, MAX_ATTEMPTS};
pub use token::{
    Claims, RefreshToken, SessionContext, TokenPurpose, TokenSet,
    ACCESS_TOKEN_EXPIRY_MINUTES, ID_TOKEN_EXPIRY_MINUTES, REFRESH_TOKEN_EXPIRY_DAYS,
};
pub use user::User;
