//! In-memory implementation of OtpRepository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::otp::{OtpCode, OtpPurpose};
use crate::errors::DomainError;

use super::r#trait::OtpRepository;

/// In-memory code store keyed by record id
pub struct InMemoryOtpRepository {
    codes: Arc<RwLock<HashMap<Uuid, OtpCode>>>,
}

impl InMemoryOtpRepository {
    pub fn new() -> Self {
        Self {
            codes: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryOtpRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OtpRepository for InMemoryOtpRepository {
    async fn save(&self, code: OtpCode) -> Result<OtpCode, DomainError> {
        let mut codes = self.codes.write().await;
        codes.insert(code.id, code.clone());
        Ok(code)
    }

    async fn find_latest(
        &self,
        email: &str,
        purpose: OtpPurpose,
    ) -> Result<Option<OtpCode>, DomainError> {
        let codes = self.codes.read().await;
        Ok(codes
            .values()
            .filter(|c| c.email == email && c.purpose == purpose)
            .max_by_key(|c| c.created_at)
            .cloned())
    }

    async fn save_replacing(&self, code: OtpCode) -> Result<(OtpCode, usize), DomainError> {
        let mut codes = self.codes.write().await;

        // Delete and insert under the same guard so no reader observes the
        // gap between them
        let before = codes.len();
        codes.retain(|_, c| {
            !(c.email == code.email && c.purpose == code.purpose && !c.consumed)
        });
        let invalidated = before - codes.len();

        codes.insert(code.id, code.clone());
        Ok((code, invalidated))
    }

    async fn consume(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut codes = self.codes.write().await;
        match codes.get_mut(&id) {
            Some(code) if !code.consumed => {
                code.consumed = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn increment_attempts(&self, id: Uuid) -> Result<i32, DomainError> {
        let mut codes = self.codes.write().await;
        match codes.get_mut(&id) {
            Some(code) => {
                code.attempts += 1;
                Ok(code.attempts)
            }
            None => Err(DomainError::NotFound {
                resource: format!("otp_code {id}"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_code(email: &str) -> OtpCode {
        OtpCode::new(
            email.to_string(),
            OtpPurpose::EmailVerification,
            "digest".to_string(),
            "salt".to_string(),
        )
    }

    #[tokio::test]
    async fn test_find_latest_orders_by_creation() {
        let repo = InMemoryOtpRepository::new();

        let mut first = sample_code("alice@example.com");
        first.created_at = first.created_at - chrono::Duration::seconds(30);
        repo.save(first).await.unwrap();

        let second = repo.save(sample_code("alice@example.com")).await.unwrap();

        let latest = repo
            .find_latest("alice@example.com", OtpPurpose::EmailVerification)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(latest.id, second.id);
    }

    #[tokio::test]
    async fn test_save_replacing_keeps_consumed_records() {
        let repo = InMemoryOtpRepository::new();

        let mut consumed = sample_code("alice@example.com");
        consumed.consumed = true;
        consumed.created_at = consumed.created_at - chrono::Duration::seconds(30);
        repo.save(consumed).await.unwrap();
        repo.save(sample_code("alice@example.com")).await.unwrap();

        let (replacement, invalidated) = repo
            .save_replacing(sample_code("alice@example.com"))
            .await
            .unwrap();

        // only the unconsumed record was invalidated; the consumed one
        // survives for audit
        assert_eq!(invalidated, 1);

        let latest = repo
            .find_latest("alice@example.com", OtpPurpose::EmailVerification)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(latest.id, replacement.id);
    }

    #[tokio::test]
    async fn test_consume_is_one_shot() {
        let repo = InMemoryOtpRepository::new();
        let code = repo.save(sample_code("alice@example.com")).await.unwrap();

        assert!(repo.consume(code.id).await.unwrap());
        assert!(!repo.consume(code.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_increment_attempts_persists() {
        let repo = InMemoryOtpRepository::new();
        let code = repo.save(sample_code("alice@example.com")).await.unwrap();

        assert_eq!(repo.increment_attempts(code.id).await.unwrap(), 1);
        assert_eq!(repo.increment_attempts(code.id).await.unwrap(), 2);

        let stored = repo
            .find_latest("alice@example.com", OtpPurpose::EmailVerification)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.attempts, 2);
    }
}
