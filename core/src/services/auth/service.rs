//! Auth orchestration flows: signup, login, refresh, logout

use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use credo_shared::utils::validation;

use crate::domain::entities::auth_event::AuthEventType;
use crate::domain::entities::otp::OtpPurpose;
use crate::domain::entities::token::{SessionContext, TokenSet};
use crate::domain::entities::user::User;
use crate::domain::value_objects::auth_response::AuthResponse;
use crate::errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
use crate::repositories::{
    AuthEventRepository, NoOpAuthEventRepository, OtpRepository, TokenRepository, UserRepository,
};
use crate::services::event::EventService;
use crate::services::otp::{DeliveryServiceTrait, IssueCodeResult, OtpService};
use crate::services::password::PasswordHasher;
use crate::services::token::{RefreshTokenManager, TokenServiceConfig, TokenSigner};

use super::config::AuthServiceConfig;

/// Orchestrates the credential and token lifecycle flows
///
/// A pure composition over its collaborators; every flow is a short
/// sequence of reads and writes with no state held here between requests.
pub struct AuthService<U, O, T, D, E = NoOpAuthEventRepository>
where
    U: UserRepository,
    O: OtpRepository,
    T: TokenRepository,
    D: DeliveryServiceTrait,
    E: AuthEventRepository,
{
    users: Arc<U>,
    otp: OtpService<O, D>,
    hasher: PasswordHasher,
    signer: TokenSigner,
    refresh_tokens: RefreshTokenManager<T>,
    token_config: TokenServiceConfig,
    config: AuthServiceConfig,
    events: Option<EventService<E>>,
}

impl<U, O, T, D> AuthService<U, O, T, D, NoOpAuthEventRepository>
where
    U: UserRepository,
    O: OtpRepository,
    T: TokenRepository,
    D: DeliveryServiceTrait,
{
    /// Creates the orchestrator without an event log collaborator
    pub fn new(
        users: Arc<U>,
        otp: OtpService<O, D>,
        hasher: PasswordHasher,
        signer: TokenSigner,
        refresh_tokens: RefreshTokenManager<T>,
        token_config: TokenServiceConfig,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            users,
            otp,
            hasher,
            signer,
            refresh_tokens,
            token_config,
            config,
            events: None,
        }
    }
}

impl<U, O, T, D, E> AuthService<U, O, T, D, E>
where
    U: UserRepository,
    O: OtpRepository,
    T: TokenRepository,
    D: DeliveryServiceTrait,
    E: AuthEventRepository,
{
    /// Creates the orchestrator with a best-effort event log attached
    #[allow(clippy::too_many_arguments)]
    pub fn with_events(
        users: Arc<U>,
        otp: OtpService<O, D>,
        hasher: PasswordHasher,
        signer: TokenSigner,
        refresh_tokens: RefreshTokenManager<T>,
        token_config: TokenServiceConfig,
        config: AuthServiceConfig,
        events: EventService<E>,
    ) -> Self {
        Self {
            users,
            otp,
            hasher,
            signer,
            refresh_tokens,
            token_config,
            config,
            events: Some(events),
        }
    }

    /// Issues a verification code to an email address
    pub async fn request_email_verification(&self, email: &str) -> DomainResult<IssueCodeResult> {
        let result = self.otp.issue(email, OtpPurpose::EmailVerification).await?;

        self.emit(
            AuthEventType::OtpIssued,
            None,
            json!({ "email": validation::normalize_email(email) }),
        )
        .await;

        Ok(result)
    }

    /// Verifies a submitted code, consuming it on success
    pub async fn verify_email(&self, email: &str, code: &str) -> DomainResult<()> {
        let normalized = validation::normalize_email(email);

        match self.otp.verify(email, OtpPurpose::EmailVerification, code).await {
            Ok(()) => {
                self.emit(
                    AuthEventType::OtpVerified,
                    None,
                    json!({ "email": normalized }),
                )
                .await;
                Ok(())
            }
            Err(err) => {
                self.emit(
                    AuthEventType::OtpVerificationFailed,
                    None,
                    json!({ "email": normalized, "reason": err.to_string() }),
                )
                .await;
                Err(err)
            }
        }
    }

    /// Creates a user account after email verification
    ///
    /// The most recent code for the email must already be consumed; the
    /// account is created with `email_verified = true`.
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        full_name: Option<String>,
    ) -> DomainResult<User> {
        let email = validation::normalize_email(email);

        if !validation::is_valid_email(&email) {
            return Err(DomainError::ValidationErr(ValidationError::InvalidEmail));
        }
        if !validation::is_valid_password(password) {
            return Err(DomainError::ValidationErr(ValidationError::PasswordLength {
                min: validation::MIN_PASSWORD_LENGTH,
                max: validation::MAX_PASSWORD_LENGTH,
            }));
        }

        if self.users.find_by_email(&email).await?.is_some() {
            self.emit(
                AuthEventType::SignupFailed,
                None,
                json!({ "email": email, "reason": "email_taken" }),
            )
            .await;
            return Err(DomainError::Auth(AuthError::EmailTaken));
        }

        let verified = self
            .otp
            .latest_is_consumed(&email, OtpPurpose::EmailVerification)
            .await?;
        if !verified {
            self.emit(
                AuthEventType::SignupFailed,
                None,
                json!({ "email": email, "reason": "email_not_verified" }),
            )
            .await;
            return Err(DomainError::Auth(AuthError::EmailNotVerified));
        }

        let password_hash = self.hasher.hash(password).await?;
        let user = self
            .users
            .create(User::new(email.clone(), password_hash, full_name))
            .await?;

        tracing::info!(
            user_id = %user.id,
            event = "signup_succeeded",
            "User account created"
        );
        self.emit(
            AuthEventType::SignupSucceeded,
            Some(user.id),
            json!({ "email": email }),
        )
        .await;

        Ok(user)
    }

    /// Authenticates a user and mints a full token set
    ///
    /// Fails with a uniform `InvalidCredentials` whether the user is
    /// missing, has no password, or the password is wrong.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        context: SessionContext,
    ) -> DomainResult<AuthResponse> {
        let email = validation::normalize_email(email);

        let user = self.users.find_by_email(&email).await?;

        let matched = match user.as_ref().and_then(|u| u.password_hash.as_deref()) {
            Some(digest) => self.hasher.verify(password, digest).await?,
            None => {
                // Same bcrypt cost whether or not the account exists
                self.hasher
                    .verify(password, &self.config.dummy_password_hash)
                    .await?;
                false
            }
        };

        let user = match user {
            Some(user) if matched => user,
            _ => {
                self.emit(
                    AuthEventType::LoginFailed,
                    None,
                    json!({ "email": email, "reason": "invalid_credentials" }),
                )
                .await;
                return Err(DomainError::Auth(AuthError::InvalidCredentials));
            }
        };

        let token_set = self.mint_token_set(&user, context).await?;

        tracing::info!(
            user_id = %user.id,
            event = "login_succeeded",
            "User authenticated"
        );
        self.emit(
            AuthEventType::LoginSucceeded,
            Some(user.id),
            json!({ "email": user.email }),
        )
        .await;

        Ok(AuthResponse::from_token_set(token_set, &user))
    }

    /// Rotates a refresh token and mints a fresh signed pair
    pub async fn refresh(
        &self,
        refresh_token: &str,
        context: SessionContext,
    ) -> DomainResult<AuthResponse> {
        let (new_plaintext, record) =
            match self.refresh_tokens.redeem(refresh_token, context).await {
                Ok(rotation) => rotation,
                Err(err) => {
                    let event_type = match err {
                        DomainError::Token(TokenError::ReuseDetected) => {
                            AuthEventType::RefreshReused
                        }
                        _ => AuthEventType::RefreshFailed,
                    };
                    self.emit(event_type, None, json!({ "reason": err.to_string() }))
                        .await;
                    return Err(err);
                }
            };

        let user = self
            .users
            .find_by_id(record.user_id)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))?;

        let access_token = self.signer.issue_access(user.id)?;
        let id_token =
            self.signer
                .issue_identity(user.id, user.email.clone(), user.full_name.clone())?;

        let token_set = TokenSet::new(
            access_token,
            id_token,
            new_plaintext,
            self.token_config.access_token_expiry_minutes * 60,
            self.token_config.refresh_token_expiry_days * 86_400,
        );

        self.emit(
            AuthEventType::TokenRefreshed,
            Some(user.id),
            json!({ "token_id": record.id }),
        )
        .await;

        Ok(AuthResponse::from_token_set(token_set, &user))
    }

    /// Revokes a single session's refresh token
    ///
    /// The audit write is detached: nothing about logout depends on it.
    pub async fn logout(&self, refresh_token: &str) -> DomainResult<bool>
    where
        E: 'static,
    {
        let revoked = self.refresh_tokens.revoke(refresh_token).await?;

        if revoked {
            self.emit_detached(AuthEventType::Logout, None, json!({}));
        }

        Ok(revoked)
    }

    /// Revokes every active refresh token for a user
    pub async fn logout_all(&self, user_id: Uuid) -> DomainResult<usize>
    where
        E: 'static,
    {
        let revoked = self.refresh_tokens.revoke_all(user_id).await?;

        self.emit_detached(
            AuthEventType::AllSessionsRevoked,
            Some(user_id),
            json!({ "revoked": revoked }),
        );

        Ok(revoked)
    }

    /// Mints the access+identity pair plus a fresh refresh token
    async fn mint_token_set(
        &self,
        user: &User,
        context: SessionContext,
    ) -> DomainResult<TokenSet> {
        let access_token = self.signer.issue_access(user.id)?;
        let id_token =
            self.signer
                .issue_identity(user.id, user.email.clone(), user.full_name.clone())?;
        let (refresh_plaintext, _) = self.refresh_tokens.issue(user.id, context).await?;

        Ok(TokenSet::new(
            access_token,
            id_token,
            refresh_plaintext,
            self.token_config.access_token_expiry_minutes * 60,
            self.token_config.refresh_token_expiry_days * 86_400,
        ))
    }

    async fn emit(
        &self,
        event_type: AuthEventType,
        user_id: Option<Uuid>,
        payload: serde_json::Value,
    ) {
        if let Some(events) = &self.events {
            events.record(event_type, user_id, payload).await;
        }
    }

    fn emit_detached(
        &self,
        event_type: AuthEventType,
        user_id: Option<Uuid>,
        payload: serde_json::Value,
    ) where
        E: 'static,
    {
        if let Some(events) = &self.events {
            events.record_detached(event_type, user_id, payload);
        }
    }
}
