//! Ports - traits implemented by the infrastructure layer.

mod auth;
mod repository;

pub use auth::{AuthError, PasswordService, SessionClaims, SessionService};
pub use repository::{BaseRepository, CommentRepository, PostRepository, UserRepository};
