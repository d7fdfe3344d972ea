//! JWT-backed session tokens.
//!
//! The session cookie carries a signed HS256 token; validating it on each
//! request is the "current user" lookup every route uses.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quill_core::ports::{AuthError, SessionClaims, SessionService};

/// Session token configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub secret: String,
    pub lifetime_hours: i64,
    pub issuer: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            lifetime_hours: 24,
            issuer: "quill".to_string(),
        }
    }
}

/// Internal claims structure for serialization.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // user_id
    name: String,
    admin: bool,
    exp: i64,    // expiration timestamp
    iat: i64,    // issued at
    iss: String, // issuer
}

/// JWT session service.
pub struct JwtSessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: SessionConfig,
}

impl JwtSessionService {
    pub fn new(config: SessionConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            encoding_key,
            decoding_key,
            config,
        }
    }

    pub fn from_env() -> Self {
        let secret = std::env::var("SESSION_SECRET")
            .unwrap_or_else(|_| "change-me-in-production".to_string());

        if secret == "change-me-in-production" {
            tracing::warn!("Using default session secret. Set SESSION_SECRET for production use.");
        }

        let config = SessionConfig {
            secret,
            lifetime_hours: std::env::var("SESSION_LIFETIME_HOURS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(24),
            issuer: std::env::var("SESSION_ISSUER").unwrap_or_else(|_| "quill".to_string()),
        };
        Self::new(config)
    }

    /// Cookie Max-Age matching the token lifetime.
    pub fn lifetime_seconds(&self) -> i64 {
        self.config.lifetime_hours * 3600
    }
}

impl SessionService for JwtSessionService {
    fn create_session(
        &self,
        user_id: Uuid,
        name: &str,
        is_admin: bool,
    ) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + TimeDelta::hours(self.config.lifetime_hours);

        let claims = Claims {
            sub: user_id.to_string(),
            name: name.to_string(),
            admin: is_admin,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidSession(e.to_string()))
    }

    fn validate_session(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::SessionExpired,
                _ => AuthError::InvalidSession(e.to_string()),
            }
        })?;

        let user_id = Uuid::parse_str(&token_data.claims.sub)
            .map_err(|e| AuthError::InvalidSession(e.to_string()))?;

        Ok(SessionClaims {
            user_id,
            name: token_data.claims.name,
            is_admin: token_data.claims.admin,
            exp: token_data.claims.exp,
        })
    }
}
