//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use quill_core::domain::{Comment, Post, User};
use quill_core::error::RepoError;
use quill_core::ports::{CommentRepository, PostRepository, UserRepository};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::PostgresBaseRepository;

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask email for logging to avoid PII in logs
        let masked = if let Some(at_pos) = email.find('@') {
            let (local, domain) = email.split_at(at_pos);
            let masked_local = if local.len() > 1 {
                format!("{}***", &local[..1])
            } else {
                "***".to_string()
            };
            format!("{}{}", masked_local, domain)
        } else {
            "***".to_string()
        };
        tracing::debug!(user_email = %masked, "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn count(&self) -> Result<u64, RepoError> {
        UserEntity::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| RepoError::Query(e.to_string()))
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_asc(post::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_by_post_id(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
