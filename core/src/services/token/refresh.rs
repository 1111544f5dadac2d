//! Opaque refresh token issuance, rotation, and reuse detection

use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::token::{RefreshToken, SessionContext};
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::TokenRepository;

use super::config::TokenServiceConfig;

/// Bytes of randomness per refresh token (256 bits)
const TOKEN_BYTES: usize = 32;

/// Service for long-lived opaque refresh tokens
///
/// A token's plaintext is returned exactly once at issuance; only its
/// SHA-256 digest is persisted, so the stored record is a lookup key and
/// nothing more.
pub struct RefreshTokenManager<R: TokenRepository> {
    repository: Arc<R>,
    refresh_ttl_days: i64,
}

impl<R: TokenRepository> RefreshTokenManager<R> {
    /// Creates a new manager
    pub fn new(repository: Arc<R>, config: &TokenServiceConfig) -> Self {
        Self {
            repository,
            refresh_ttl_days: config.refresh_token_expiry_days,
        }
    }

    /// Issues a fresh refresh token for a user
    ///
    /// # Returns
    /// The plaintext token (never retrievable again) and its stored record.
    pub async fn issue(
        &self,
        user_id: Uuid,
        context: SessionContext,
    ) -> DomainResult<(String, RefreshToken)> {
        let plaintext = Self::generate_token();
        let record = RefreshToken::new_with_ttl_days(
            user_id,
            Self::hash_token(&plaintext),
            context,
            self.refresh_ttl_days,
        );

        let record = self
            .repository
            .save(record)
            .await
            .map_err(|_| DomainError::Token(TokenError::GenerationFailed))?;

        Ok((plaintext, record))
    }

    /// Redeems a refresh token, rotating it into a replacement
    ///
    /// Exactly one of two concurrent redemptions of the same token wins;
    /// the loser fails with `Revoked`. Presenting a token that was already
    /// rotated away is treated as theft: the whole rotation chain and any
    /// other active tokens for the user are revoked, and the call fails
    /// with `ReuseDetected`.
    pub async fn redeem(
        &self,
        plaintext: &str,
        context: SessionContext,
    ) -> DomainResult<(String, RefreshToken)> {
        let token_hash = Self::hash_token(plaintext);

        let old = self
            .repository
            .find_by_hash(&token_hash)
            .await?
            .ok_or(DomainError::Token(TokenError::NotFound))?;

        if old.is_expired() {
            return Err(DomainError::Token(TokenError::Expired));
        }

        if old.was_rotated() {
            tracing::warn!(
                user_id = %old.user_id,
                token_id = %old.id,
                event = "refresh_reuse_detected",
                "Rotated refresh token presented again; revoking chain and sessions"
            );
            let chain = self.repository.revoke_chain(old.id).await?;
            let sessions = self.repository.revoke_all_for_user(old.user_id).await?;
            tracing::info!(
                user_id = %old.user_id,
                chain_revoked = chain,
                sessions_revoked = sessions,
                event = "defensive_revocation",
                "Defensive revocation complete"
            );
            return Err(DomainError::Token(TokenError::ReuseDetected));
        }

        if old.revoked {
            return Err(DomainError::Token(TokenError::Revoked));
        }

        let new_plaintext = Self::generate_token();
        let replacement = RefreshToken::new_with_ttl_days(
            old.user_id,
            Self::hash_token(&new_plaintext),
            context,
            self.refresh_ttl_days,
        );

        // Single atomic unit: revoke old, link replaced_by, insert new.
        // Losing the race means another redemption already rotated it.
        let won = self.repository.rotate(old.id, replacement.clone()).await?;
        if !won {
            return Err(DomainError::Token(TokenError::Revoked));
        }

        tracing::info!(
            user_id = %old.user_id,
            old_token_id = %old.id,
            new_token_id = %replacement.id,
            event = "refresh_rotated",
            "Refresh token rotated"
        );

        Ok((new_plaintext, replacement))
    }

    /// Revokes a single token by plaintext (logout)
    ///
    /// # Returns
    /// * `Ok(true)` - Token found and revoked
    /// * `Ok(false)` - No matching usable token
    pub async fn revoke(&self, plaintext: &str) -> DomainResult<bool> {
        let token_hash = Self::hash_token(plaintext);
        match self.repository.find_by_hash(&token_hash).await? {
            Some(record) => self.repository.revoke(record.id).await,
            None => Ok(false),
        }
    }

    /// Revokes every active token for a user (logout from all sessions)
    pub async fn revoke_all(&self, user_id: Uuid) -> DomainResult<usize> {
        self.repository.revoke_all_for_user(user_id).await
    }

    /// Removes expired token records
    pub async fn cleanup_expired(&self) -> DomainResult<usize> {
        self.repository.delete_expired().await
    }

    /// Generates an opaque token with 256 bits of randomness
    fn generate_token() -> String {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    /// Digest used as the storage lookup key
    pub(crate) fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hex::encode(hasher.finalize())
    }
}
