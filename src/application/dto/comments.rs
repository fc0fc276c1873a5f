use crate::domain::comment::{Comment, CommentThread};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentDto {
    pub id: i64,
    pub article_id: i64,
    pub user_id: i64,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_comment_id: Option<i64>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Comment> for CommentDto {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id.into(),
            article_id: comment.article_id.into(),
            user_id: comment.user_id.into(),
            content: comment.body.into(),
            parent_comment_id: comment.parent_comment_id.map(Into::into),
            active: comment.active,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentThreadDto {
    #[serde(flatten)]
    pub root: CommentDto,
    pub replies_count: usize,
    pub replies: Vec<CommentDto>,
}

impl From<CommentThread> for CommentThreadDto {
    fn from(thread: CommentThread) -> Self {
        let replies: Vec<CommentDto> = thread.replies.into_iter().map(Into::into).collect();
        Self {
            root: thread.root.into(),
            replies_count: replies.len(),
            replies,
        }
    }
}
