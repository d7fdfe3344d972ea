//! Error handling - maps the application's failure taxonomy to HTTP
//! outcomes at the rendering boundary.

use actix_web::http::header;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::fmt;

use crate::{flash, views};

/// Application-level error type for all handlers.
///
/// Validation failures are not errors here: handlers re-render the form with
/// inline messages instead. Conflicts usually become flash redirects inside
/// the handler; the variant exists for the paths that cannot.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    /// No session on a session-required route - redirects to the login page.
    AuthenticationRequired,
    /// Authenticated but not the administrator.
    Forbidden,
    Conflict(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::AuthenticationRequired => write!(f, "Authentication required"),
            AppError::Forbidden => write!(f, "Forbidden"),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AuthenticationRequired => StatusCode::SEE_OTHER,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound(detail) => HttpResponse::NotFound()
                .content_type(views::CONTENT_TYPE_HTML)
                .body(views::error_page(404, "Not Found", detail)),
            AppError::AuthenticationRequired => HttpResponse::SeeOther()
                .insert_header((header::LOCATION, "/login"))
                .cookie(flash::set("Please log in to continue"))
                .finish(),
            AppError::Forbidden => HttpResponse::Forbidden()
                .content_type(views::CONTENT_TYPE_HTML)
                .body(views::error_page(
                    403,
                    "Forbidden",
                    "Only the administrator may do that.",
                )),
            AppError::Conflict(detail) => HttpResponse::Conflict()
                .content_type(views::CONTENT_TYPE_HTML)
                .body(views::error_page(409, "Conflict", detail)),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                HttpResponse::InternalServerError()
                    .content_type(views::CONTENT_TYPE_HTML)
                    .body(views::error_page(
                        500,
                        "Internal Server Error",
                        "Something went wrong on our side.",
                    ))
            }
        }
    }
}

// Conversion from domain errors
impl From<quill_core::error::RepoError> for AppError {
    fn from(err: quill_core::error::RepoError) -> Self {
        match err {
            quill_core::error::RepoError::NotFound => {
                AppError::NotFound("Resource not found".to_string())
            }
            quill_core::error::RepoError::Constraint(msg) => AppError::Conflict(msg),
            quill_core::error::RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            quill_core::error::RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

impl From<quill_core::ports::AuthError> for AppError {
    fn from(err: quill_core::ports::AuthError) -> Self {
        match err {
            quill_core::ports::AuthError::SessionExpired
            | quill_core::ports::AuthError::InvalidSession(_) => AppError::AuthenticationRequired,
            quill_core::ports::AuthError::HashingError(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
