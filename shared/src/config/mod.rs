//! Configuration types
//!
//! All configuration is modelled as plain immutable values constructed at
//! process start and passed into service constructors. Nothing here reads
//! the environment; loading is the embedding process's concern.

pub mod auth;

pub use auth::{HashingConfig, JwtConfig, OtpConfig};
