//! Database connection management and PostgreSQL repositories.

mod connections;
mod postgres_base;
mod postgres_repo;

pub mod entity;

pub use connections::{DatabaseConfig, DatabaseConnection, connect};
pub use postgres_repo::{
    PostgresCommentRepository, PostgresPostRepository, PostgresUserRepository,
};
