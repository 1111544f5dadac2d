//! Business services containing the credential and token lifecycle logic.

pub mod auth;
pub mod event;
pub mod otp;
pub mod password;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig};
pub use event::EventService;
pub use otp::{DeliveryServiceTrait, IssueCodeResult, OtpService, OtpServiceConfig};
pub use password::{PasswordHasher, PasswordHasherConfig};
pub use token::{RefreshTokenManager, TokenServiceConfig, TokenSigner};
