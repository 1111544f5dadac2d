//! One-time code service for email verification
//!
//! This module implements the full code lifecycle:
//! - Secure code generation and salted hashing (never the raw code at rest)
//! - Newest-wins issuance (prior unconsumed codes are invalidated)
//! - One-shot verification with a persistent attempt ceiling
//! - Constant-time digest comparison

mod config;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::OtpServiceConfig;
pub use service::OtpService;
pub use traits::DeliveryServiceTrait;
pub use types::IssueCodeResult;
