//! In-memory implementation of TokenRepository.
//!
//! All mutations run under a single write lock, which is the in-memory
//! analogue of the conditional-update serialization a SQL backend provides
//! for competing rotations.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

use super::r#trait::TokenRepository;

/// In-memory refresh token store keyed by record id
pub struct InMemoryTokenRepository {
    tokens: Arc<RwLock<HashMap<Uuid, RefreshToken>>>,
}

impl InMemoryTokenRepository {
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Test helper: replace a stored record in place, bypassing the
    /// duplicate-digest check in `save`
    pub async fn overwrite(&self, token: RefreshToken) {
        let mut tokens = self.tokens.write().await;
        tokens.insert(token.id, token);
    }
}

impl Default for InMemoryTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn save(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        let mut tokens = self.tokens.write().await;

        if tokens.values().any(|t| t.token_hash == token.token_hash) {
            return Err(DomainError::Validation {
                message: "token digest already exists".to_string(),
            });
        }

        tokens.insert(token.id, token.clone());
        Ok(token)
    }

    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.values().find(|t| t.token_hash == token_hash).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<RefreshToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.get(&id).cloned())
    }

    async fn find_active_by_user(&self, user_id: Uuid) -> Result<Vec<RefreshToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens
            .values()
            .filter(|t| t.user_id == user_id && t.is_usable())
            .cloned()
            .collect())
    }

    async fn rotate(
        &self,
        old_id: Uuid,
        replacement: RefreshToken,
    ) -> Result<bool, DomainError> {
        let mut tokens = self.tokens.write().await;

        // Conditional on the old record still being unrevoked; both writes
        // happen under the same guard so no partial rotation is observable.
        let won = match tokens.get_mut(&old_id) {
            Some(old) if !old.revoked => {
                old.supersede(replacement.id);
                true
            }
            _ => false,
        };

        if won {
            tokens.insert(replacement.id, replacement);
        }

        Ok(won)
    }

    async fn revoke(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut tokens = self.tokens.write().await;
        match tokens.get_mut(&id) {
            Some(token) if !token.revoked => {
                token.revoke();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let mut tokens = self.tokens.write().await;
        let mut count = 0;

        for token in tokens.values_mut() {
            if token.user_id == user_id && !token.revoked {
                token.revoke();
                count += 1;
            }
        }

        Ok(count)
    }

    async fn revoke_chain(&self, start_id: Uuid) -> Result<usize, DomainError> {
        let mut tokens = self.tokens.write().await;
        let mut count = 0;
        let mut cursor = Some(start_id);

        while let Some(id) = cursor {
            match tokens.get_mut(&id) {
                Some(token) => {
                    if !token.revoked {
                        token.revoke();
                        count += 1;
                    }
                    cursor = token.replaced_by;
                }
                None => break,
            }
        }

        Ok(count)
    }

    async fn delete_expired(&self) -> Result<usize, DomainError> {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|_, t| !t.is_expired());
        Ok(before - tokens.len())
    }
}
