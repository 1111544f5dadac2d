//! Configuration for the auth orchestrator

/// Digest verified when login targets a missing user or a user without a
/// password, so both halves of a failed login cost one bcrypt comparison.
const DUMMY_PASSWORD_HASH: &str = "$2a$12$R9h/cIPz0gi.URNNX3kh2OPST9/PgBkqquzi.Ss7KIUgO2t0jWMUW";

/// Configuration for the auth orchestration flows
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Well-formed bcrypt digest verified (and discarded) on failed
    /// logins for timing parity
    pub dummy_password_hash: String,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            dummy_password_hash: DUMMY_PASSWORD_HASH.to_string(),
        }
    }
}
