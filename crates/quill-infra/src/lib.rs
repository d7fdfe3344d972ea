//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! PostgreSQL repositories via SeaORM, Argon2 password hashing, and the
//! JWT-backed session token service.

pub mod auth;
pub mod database;

pub use auth::{Argon2PasswordService, JwtSessionService, SessionConfig};
pub use database::{
    DatabaseConfig, DatabaseConnection, PostgresCommentRepository, PostgresPostRepository,
    PostgresUserRepository, connect,
};
