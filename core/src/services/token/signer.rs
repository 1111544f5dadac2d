//! Signed access/identity token issuance and verification

use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, TokenPurpose};
use crate::errors::{DomainError, DomainResult, TokenError};

use super::config::TokenServiceConfig;

/// Service for minting and verifying signed claim sets
///
/// Tokens are stateless: validity is established purely by signature,
/// expiry, and the embedded purpose discriminator, never by a lookup.
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
    access_ttl: Duration,
    id_ttl: Duration,
}

impl TokenSigner {
    /// Creates a new signer from process-wide configuration
    pub fn new(config: &TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            encoding_key,
            decoding_key,
            validation,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            access_ttl: Duration::minutes(config.access_token_expiry_minutes),
            id_ttl: Duration::minutes(config.id_token_expiry_minutes),
        }
    }

    /// Issues a signed access token for a user
    pub fn issue_access(&self, user_id: Uuid) -> DomainResult<String> {
        let claims = Claims::new_access(user_id, self.access_ttl, &self.issuer, &self.audience);
        self.encode(&claims)
    }

    /// Issues a signed identity token carrying email and display name
    pub fn issue_identity(
        &self,
        user_id: Uuid,
        email: String,
        name: Option<String>,
    ) -> DomainResult<String> {
        let claims =
            Claims::new_identity(user_id, email, name, self.id_ttl, &self.issuer, &self.audience);
        self.encode(&claims)
    }

    /// Verifies a token for an expected purpose and returns its claims
    ///
    /// An access token is never accepted where an identity token is
    /// expected and vice versa (`WrongPurpose`).
    pub fn verify(&self, token: &str, expected: TokenPurpose) -> DomainResult<Claims> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        DomainError::Token(TokenError::Expired)
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        DomainError::Token(TokenError::SignatureInvalid)
                    }
                    _ => DomainError::Token(TokenError::Malformed),
                }
            })?;

        if token_data.claims.typ != expected {
            return Err(DomainError::Token(TokenError::WrongPurpose));
        }

        Ok(token_data.claims)
    }

    fn encode(&self, claims: &Claims) -> DomainResult<String> {
        let header = Header::new(Algorithm::HS256);
        encode(&header, claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::GenerationFailed))
    }
}
