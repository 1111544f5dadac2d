//! Credential verification and session orchestration
//!
//! Composes the password hasher, one-time code service, token signer, and
//! refresh token manager into the signup, login, refresh, and logout
//! flows. Holds no state of its own beyond what it reads and writes
//! through its collaborators.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use service::AuthService;
