//! Token services
//!
//! Two collaborating pieces:
//! - `TokenSigner`: short-lived signed access/identity tokens, stateless,
//!   proven valid by signature and expiry alone
//! - `RefreshTokenManager`: long-lived opaque refresh tokens with
//!   rotation, revocation, and reuse detection

mod config;
mod refresh;
mod signer;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use refresh::RefreshTokenManager;
pub use signer::TokenSigner;
