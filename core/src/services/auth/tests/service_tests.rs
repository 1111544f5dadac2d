//! End-to-end tests over the signup, login, refresh, and logout flows

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::auth_event::AuthEventType;
use crate::domain::entities::token::{SessionContext, TokenPurpose};
use crate::errors::{AuthError, DomainError, TokenError, ValidationError};
use crate::repositories::{
    InMemoryAuthEventRepository, InMemoryOtpRepository, InMemoryTokenRepository,
    InMemoryUserRepository, UserRepository,
};
use crate::services::auth::{AuthService, AuthServiceConfig};
use crate::services::event::EventService;
use crate::services::otp::{OtpService, OtpServiceConfig};
use crate::services::password::{PasswordHasher, PasswordHasherConfig};
use crate::services::token::{RefreshTokenManager, TokenServiceConfig, TokenSigner};

use super::mocks::MockDeliveryService;

const EMAIL: &str = "alice@example.com";
const PASSWORD: &str = "correct-horse";

type TestAuthService = AuthService<
    InMemoryUserRepository,
    InMemoryOtpRepository,
    InMemoryTokenRepository,
    MockDeliveryService,
    InMemoryAuthEventRepository,
>;

struct Harness {
    service: TestAuthService,
    delivery: Arc<MockDeliveryService>,
    users: Arc<InMemoryUserRepository>,
    events: Arc<InMemoryAuthEventRepository>,
    token_config: TokenServiceConfig,
}

fn setup() -> Harness {
    let users = Arc::new(InMemoryUserRepository::new());
    let otp_repository = Arc::new(InMemoryOtpRepository::new());
    let tokens = Arc::new(InMemoryTokenRepository::new());
    let events = Arc::new(InMemoryAuthEventRepository::new());
    let delivery = Arc::new(MockDeliveryService::new());

    let token_config = TokenServiceConfig {
        jwt_secret: "test-secret-for-auth-flows".to_string(),
        ..TokenServiceConfig::default()
    };

    let service = AuthService::with_events(
        users.clone(),
        OtpService::new(otp_repository, delivery.clone(), OtpServiceConfig::default()),
        // minimum cost keeps the suite fast
        PasswordHasher::new(PasswordHasherConfig { cost: 4 }),
        TokenSigner::new(&token_config),
        RefreshTokenManager::new(tokens, &token_config),
        token_config.clone(),
        AuthServiceConfig::default(),
        EventService::new(events.clone()),
    );

    Harness {
        service,
        delivery,
        users,
        events,
        token_config,
    }
}

fn ctx() -> SessionContext {
    SessionContext::new(Some("test-agent".to_string()), Some("127.0.0.1".to_string()))
}

/// Runs the OTP round trip so that signup's precondition holds
async fn verify_email(harness: &Harness, email: &str) {
    harness
        .service
        .request_email_verification(email)
        .await
        .unwrap();
    let code = harness.delivery.sent_code(&email.to_lowercase()).unwrap();
    harness.service.verify_email(email, &code).await.unwrap();
}

async fn signed_up_user(harness: &Harness) -> Uuid {
    verify_email(harness, EMAIL).await;
    harness
        .service
        .signup(EMAIL, PASSWORD, Some("Alice".to_string()))
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn test_signup_after_verification() {
    let harness = setup();

    verify_email(&harness, EMAIL).await;
    let user = harness
        .service
        .signup(EMAIL, PASSWORD, Some("Alice".to_string()))
        .await
        .unwrap();

    assert_eq!(user.email, EMAIL);
    assert!(user.email_verified);
    assert_eq!(user.full_name.as_deref(), Some("Alice"));

    // stored hash, never the password
    let stored = harness.users.find_by_email(EMAIL).await.unwrap().unwrap();
    let digest = stored.password_hash.unwrap();
    assert_ne!(digest, PASSWORD);
    assert!(digest.starts_with("$2"));
}

#[tokio::test]
async fn test_signup_requires_verified_email() {
    let harness = setup();

    let err = harness
        .service
        .signup(EMAIL, PASSWORD, None)
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::Auth(AuthError::EmailNotVerified));

    // a pending, unconsumed code is not enough
    harness
        .service
        .request_email_verification(EMAIL)
        .await
        .unwrap();
    let err = harness
        .service
        .signup(EMAIL, PASSWORD, None)
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::Auth(AuthError::EmailNotVerified));
}

#[tokio::test]
async fn test_signup_rejects_taken_email() {
    let harness = setup();
    signed_up_user(&harness).await;

    let err = harness
        .service
        .signup(EMAIL, "other-password", None)
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::Auth(AuthError::EmailTaken));
}

#[tokio::test]
async fn test_signup_input_validation() {
    let harness = setup();

    let err = harness
        .service
        .signup("not-an-email", PASSWORD, None)
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::ValidationErr(ValidationError::InvalidEmail));

    let err = harness.service.signup(EMAIL, "short", None).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::ValidationErr(ValidationError::PasswordLength { .. })
    ));
}

#[tokio::test]
async fn test_signup_normalizes_email() {
    let harness = setup();

    verify_email(&harness, "Alice@Example.COM").await;
    let user = harness
        .service
        .signup("Alice@Example.COM", PASSWORD, None)
        .await
        .unwrap();

    assert_eq!(user.email, EMAIL);
}

#[tokio::test]
async fn test_login_returns_valid_token_set() {
    let harness = setup();
    let user_id = signed_up_user(&harness).await;

    let response = harness.service.login(EMAIL, PASSWORD, ctx()).await.unwrap();

    assert_eq!(response.user_id, user_id);
    assert_eq!(response.email, EMAIL);
    assert_eq!(response.expires_in, 15 * 60);

    // both signed tokens verify and carry the right purpose
    let signer = TokenSigner::new(&harness.token_config);
    let access = signer
        .verify(&response.access_token, TokenPurpose::Access)
        .unwrap();
    assert_eq!(access.user_id().unwrap(), user_id);

    let identity = signer
        .verify(&response.id_token, TokenPurpose::Identity)
        .unwrap();
    assert_eq!(identity.email.as_deref(), Some(EMAIL));
    assert_eq!(identity.name.as_deref(), Some("Alice"));
}

#[tokio::test]
async fn test_login_failures_are_uniform() {
    let harness = setup();
    signed_up_user(&harness).await;

    let wrong_password = harness
        .service
        .login(EMAIL, "wrong-password", ctx())
        .await
        .unwrap_err();
    let unknown_user = harness
        .service
        .login("nobody@example.com", PASSWORD, ctx())
        .await
        .unwrap_err();

    assert_eq!(wrong_password, DomainError::Auth(AuthError::InvalidCredentials));
    assert_eq!(unknown_user, DomainError::Auth(AuthError::InvalidCredentials));
}

#[tokio::test]
async fn test_refresh_rotates_and_reminted_tokens_verify() {
    let harness = setup();
    let user_id = signed_up_user(&harness).await;

    let login = harness.service.login(EMAIL, PASSWORD, ctx()).await.unwrap();
    let refreshed = harness
        .service
        .refresh(&login.refresh_token, ctx())
        .await
        .unwrap();

    assert_eq!(refreshed.user_id, user_id);
    assert_ne!(refreshed.refresh_token, login.refresh_token);

    let signer = TokenSigner::new(&harness.token_config);
    let access = signer
        .verify(&refreshed.access_token, TokenPurpose::Access)
        .unwrap();
    assert_eq!(access.user_id().unwrap(), user_id);
}

#[tokio::test]
async fn test_redeeming_stale_refresh_token_is_reuse() {
    let harness = setup();
    signed_up_user(&harness).await;

    let login = harness.service.login(EMAIL, PASSWORD, ctx()).await.unwrap();
    let refreshed = harness
        .service
        .refresh(&login.refresh_token, ctx())
        .await
        .unwrap();

    // the pre-rotation plaintext is now evidence of theft
    let err = harness
        .service
        .refresh(&login.refresh_token, ctx())
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::Token(TokenError::ReuseDetected));

    // the defensive revocation killed the successor too
    let err = harness
        .service
        .refresh(&refreshed.refresh_token, ctx())
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::Token(TokenError::Revoked));

    let events = harness.events.all().await;
    assert!(events
        .iter()
        .any(|e| e.event_type == AuthEventType::RefreshReused));
}

#[tokio::test]
async fn test_logout_revokes_session() {
    let harness = setup();
    signed_up_user(&harness).await;

    let login = harness.service.login(EMAIL, PASSWORD, ctx()).await.unwrap();

    assert!(harness.service.logout(&login.refresh_token).await.unwrap());

    // logout is not rotation, so redeeming fails Revoked, not ReuseDetected
    let err = harness
        .service
        .refresh(&login.refresh_token, ctx())
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::Token(TokenError::Revoked));
}

#[tokio::test]
async fn test_logout_all_revokes_every_session() {
    let harness = setup();
    let user_id = signed_up_user(&harness).await;

    let first = harness.service.login(EMAIL, PASSWORD, ctx()).await.unwrap();
    let second = harness.service.login(EMAIL, PASSWORD, ctx()).await.unwrap();

    let revoked = harness.service.logout_all(user_id).await.unwrap();
    assert_eq!(revoked, 2);

    for token in [&first.refresh_token, &second.refresh_token] {
        let err = harness.service.refresh(token, ctx()).await.unwrap_err();
        assert_eq!(err, DomainError::Token(TokenError::Revoked));
    }
}

#[tokio::test]
async fn test_logout_audit_lands_on_detached_task() {
    let harness = setup();
    let user_id = signed_up_user(&harness).await;

    let login = harness.service.login(EMAIL, PASSWORD, ctx()).await.unwrap();
    harness.service.logout(&login.refresh_token).await.unwrap();
    harness.service.login(EMAIL, PASSWORD, ctx()).await.unwrap();
    harness.service.logout_all(user_id).await.unwrap();

    // detached audit writes run on their own tasks
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    let types: Vec<AuthEventType> = harness
        .events
        .all()
        .await
        .iter()
        .map(|e| e.event_type)
        .collect();
    assert!(types.contains(&AuthEventType::Logout));
    assert!(types.contains(&AuthEventType::AllSessionsRevoked));
}

#[tokio::test]
async fn test_flows_emit_events_without_secrets() {
    let harness = setup();
    let user_id = signed_up_user(&harness).await;
    harness.service.login(EMAIL, PASSWORD, ctx()).await.unwrap();
    harness
        .service
        .login(EMAIL, "wrong-password", ctx())
        .await
        .unwrap_err();

    let events = harness.events.all().await;
    let types: Vec<AuthEventType> = events.iter().map(|e| e.event_type).collect();

    assert!(types.contains(&AuthEventType::OtpIssued));
    assert!(types.contains(&AuthEventType::OtpVerified));
    assert!(types.contains(&AuthEventType::SignupSucceeded));
    assert!(types.contains(&AuthEventType::LoginSucceeded));
    assert!(types.contains(&AuthEventType::LoginFailed));

    let signup = events
        .iter()
        .find(|e| e.event_type == AuthEventType::SignupSucceeded)
        .unwrap();
    assert_eq!(signup.user_id, Some(user_id));

    // no payload ever carries credential material
    for event in &events {
        let raw = serde_json::to_string(&event.payload).unwrap();
        assert!(!raw.contains(PASSWORD), "{raw}");
        assert!(!raw.contains("wrong-password"), "{raw}");
    }
}
