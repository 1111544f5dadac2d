//! # Credo Core
//!
//! Credential and token lifecycle engine: one-time email verification
//! codes, password-based login, and signed access/identity tokens paired
//! with rotating refresh tokens. This crate contains domain entities,
//! business services, repository interfaces, and error types; transport,
//! storage engines, and mail delivery are collaborators behind traits.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
