use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Comment entity - attached to a post by a registered user.
///
/// The author's display name is denormalized onto the row so a comment
/// renders without a join back to users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub author_name: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new comment on a post.
    pub fn new(post_id: Uuid, user_id: Uuid, author_name: String, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_id,
            user_id,
            author_name,
            text,
            created_at: Utc::now(),
        }
    }
}
