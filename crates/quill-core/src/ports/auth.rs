//! Authentication ports - password hashing and session tokens.

use uuid::Uuid;

/// Claims carried by a session token across requests.
#[derive(Debug, Clone)]
pub struct SessionClaims {
    pub user_id: Uuid,
    pub name: String,
    pub is_admin: bool,
    pub exp: i64,
}

/// Session token service - issues and validates the signed token stored in
/// the session cookie.
pub trait SessionService: Send + Sync {
    /// Issue a session token for a logged-in user.
    fn create_session(
        &self,
        user_id: Uuid,
        name: &str,
        is_admin: bool,
    ) -> Result<String, AuthError>;

    /// Validate a token and recover its claims.
    fn validate_session(&self, token: &str) -> Result<SessionClaims, AuthError>;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a stored hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Session expired")]
    SessionExpired,

    #[error("Invalid session token: {0}")]
    InvalidSession(String),

    #[error("Hashing error: {0}")]
    HashingError(String),
}
