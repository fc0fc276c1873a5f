use crate::domain::article::ArticleId;
use crate::domain::comment::entity::{Comment, CommentThread, NewComment};
use crate::domain::comment::value_objects::{CommentBody, CommentId};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn insert(&self, comment: NewComment) -> DomainResult<Comment>;
    async fn find_by_id(&self, id: CommentId) -> DomainResult<Option<Comment>>;
    async fn update_body(
        &self,
        id: CommentId,
        body: CommentBody,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<Comment>;
    /// Soft-delete the comment; when `cascade_replies` is set, direct replies
    /// are soft-deleted in the same transaction.
    async fn soft_delete(
        &self,
        id: CommentId,
        cascade_replies: bool,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<()>;
    /// Active root comments (newest first) with their active replies (oldest
    /// first).
    async fn list_threads(&self, article_id: ArticleId) -> DomainResult<Vec<CommentThread>>;
}
