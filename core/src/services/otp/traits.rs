//! Trait for the delivery collaborator (email/SMS).

use async_trait::async_trait;

/// Trait for delivering a one-time code to its recipient
///
/// Fire-and-forget from the engine's perspective: the raw code crosses
/// this boundary exactly once and is never stored or logged.
#[async_trait]
pub trait DeliveryServiceTrait: Send + Sync {
    /// Deliver a verification code, returning a provider message id
    async fn send_verification_code(&self, email: &str, code: &str) -> Result<String, String>;
}
