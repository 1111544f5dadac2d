//! Shared configuration and utilities for the Credo auth engine
//!
//! This crate provides the pieces used across the workspace:
//! - Immutable configuration types, built once at startup and injected
//! - Validation utilities (email format, password shape)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{HashingConfig, JwtConfig, OtpConfig};
pub use utils::validation;
