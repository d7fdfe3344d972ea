use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity - a registered reader/commenter, or the single administrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    /// Exactly one user carries this flag: the first account ever registered.
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and creation timestamp.
    pub fn new(name: String, email: String, password_hash: String, is_admin: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            is_admin,
            created_at: Utc::now(),
        }
    }
}
