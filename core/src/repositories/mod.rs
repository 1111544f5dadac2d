//! Repository interfaces for the storage collaborator.
//!
//! Durable state lives behind these traits; the engine itself holds no
//! cross-request state. In-memory implementations are provided for tests
//! and as reference semantics for the atomic operations each trait
//! requires of a real storage backend.

pub mod event;
pub mod otp;
pub mod token;
pub mod user;

pub use event::{AuthEventRepository, InMemoryAuthEventRepository, NoOpAuthEventRepository};
pub use otp::{InMemoryOtpRepository, OtpRepository};
pub use token::{InMemoryTokenRepository, TokenRepository};
pub use user::{InMemoryUserRepository, UserRepository};
