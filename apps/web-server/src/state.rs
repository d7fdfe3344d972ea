//! Application state - shared across all handlers.
//!
//! Constructed once at startup and injected through `web::Data`; there are no
//! process-wide singletons.

use std::sync::Arc;

use quill_core::error::RepoError;
use quill_core::ports::{CommentRepository, PasswordService, PostRepository, UserRepository};
use quill_infra::auth::{Argon2PasswordService, JwtSessionService};
use quill_infra::database::{
    DatabaseConnection, PostgresCommentRepository, PostgresPostRepository, PostgresUserRepository,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub passwords: Arc<dyn PasswordService>,
    pub sessions: Arc<JwtSessionService>,
}

impl AppState {
    /// Assemble the state from a shared connection and a session service.
    pub fn build(db: Arc<DatabaseConnection>, sessions: Arc<JwtSessionService>) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(db.clone())),
            posts: Arc::new(PostgresPostRepository::new(db.clone())),
            comments: Arc::new(PostgresCommentRepository::new(db)),
            passwords: Arc::new(Argon2PasswordService::new()),
            sessions,
        }
    }

    /// Connect to the database and build the application state.
    pub async fn connect(config: &AppConfig) -> Result<Self, RepoError> {
        let db = quill_infra::connect(&config.database).await?;
        let state = Self::build(Arc::new(db), Arc::new(JwtSessionService::from_env()));

        tracing::info!("Application state initialized");
        Ok(state)
    }
}
