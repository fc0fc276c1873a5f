// src/domain/comment/entity.rs
use crate::domain::article::ArticleId;
use crate::domain::comment::value_objects::{CommentBody, CommentId};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};

/// A comment in a one-level thread: either a root comment on an article or a
/// direct reply to a root comment. Replies to replies are rejected.
#[derive(Debug, Clone)]
pub struct Comment {
    pub id: CommentId,
    pub article_id: ArticleId,
    pub user_id: UserId,
    pub body: CommentBody,
    pub parent_comment_id: Option<CommentId>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn is_root(&self) -> bool {
        self.parent_comment_id.is_none()
    }

    /// Checks that `self` may serve as the parent of a new reply on
    /// `article_id`: it must be an active root comment on the same article.
    pub fn ensure_valid_parent(&self, article_id: ArticleId) -> DomainResult<()> {
        if !self.active {
            return Err(DomainError::NotFound("parent comment not found".into()));
        }
        if self.article_id != article_id {
            return Err(DomainError::Validation(
                "parent comment belongs to a different article".into(),
            ));
        }
        if !self.is_root() {
            return Err(DomainError::Validation(
                "replies to replies are not allowed".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub article_id: ArticleId,
    pub user_id: UserId,
    pub body: CommentBody,
    pub parent_comment_id: Option<CommentId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A root comment with its direct replies, as served to thread listings.
#[derive(Debug, Clone)]
pub struct CommentThread {
    pub root: Comment,
    pub replies: Vec<Comment>,
}
