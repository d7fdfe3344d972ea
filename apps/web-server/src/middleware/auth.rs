//! Session authentication - the current-user extractor and the admin gate.

use actix_web::cookie::{Cookie, SameSite, time::Duration};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use std::future::{Ready, ready};

use quill_core::ports::{SessionClaims, SessionService};

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Name of the cookie carrying the signed session token.
pub const SESSION_COOKIE: &str = "quill_session";

/// Authenticated user identity extractor.
///
/// Using this as a handler argument makes the route session-required: a
/// missing or invalid session short-circuits into a redirect to `/login`
/// before the handler body runs.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: uuid::Uuid,
    pub name: String,
    pub is_admin: bool,
}

impl From<SessionClaims> for Identity {
    fn from(claims: SessionClaims) -> Self {
        Self {
            user_id: claims.user_id,
            name: claims.name,
            is_admin: claims.is_admin,
        }
    }
}

/// Cookie establishing a session, set at login.
pub fn session_cookie(token: String, max_age_seconds: i64) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(max_age_seconds))
        .finish()
}

/// Removal cookie, set at logout.
pub fn clear_session_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}

/// Admin-only authorization predicate, invoked before any admin handler
/// mutates anything. Deny is a 403 with no side effects.
pub fn require_admin(identity: &Identity) -> Result<(), AppError> {
    if identity.is_admin {
        Ok(())
    } else {
        tracing::debug!(user_id = %identity.user_id, "admin gate denied");
        Err(AppError::Forbidden)
    }
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = match req.app_data::<web::Data<AppState>>() {
            Some(state) => state,
            None => {
                tracing::error!("AppState not found in app data");
                return ready(Err(AppError::Internal(
                    "Server configuration error".to_string(),
                )));
            }
        };

        let cookie = match req.cookie(SESSION_COOKIE) {
            Some(cookie) => cookie,
            None => return ready(Err(AppError::AuthenticationRequired)),
        };

        match state.sessions.validate_session(cookie.value()) {
            Ok(claims) => ready(Ok(Identity::from(claims))),
            Err(e) => {
                tracing::debug!("session rejected: {}", e);
                ready(Err(AppError::AuthenticationRequired))
            }
        }
    }
}

/// Optional identity extractor - doesn't fail if not authenticated.
pub struct OptionalIdentity(pub Option<Identity>);

impl FromRequest for OptionalIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        match Identity::from_request(req, payload).into_inner() {
            Ok(identity) => ready(Ok(OptionalIdentity(Some(identity)))),
            Err(_) => ready(Ok(OptionalIdentity(None))),
        }
    }
}
