// src/infrastructure/repositories/postgres_comment.rs
use super::error::map_sqlx;
use crate::domain::article::ArticleId;
use crate::domain::comment::{
    Comment, CommentBody, CommentId, CommentRepository, CommentThread, NewComment,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

const COMMENT_COLUMNS: &str =
    "id, article_id, user_id, comments, parent_comment_id, active, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CommentRow {
    id: i64,
    article_id: i64,
    user_id: i64,
    comments: String,
    parent_comment_id: Option<i64>,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CommentRow> for Comment {
    type Error = DomainError;

    fn try_from(row: CommentRow) -> Result<Self, Self::Error> {
        Ok(Comment {
            id: CommentId::new(row.id)?,
            article_id: ArticleId::new(row.article_id)?,
            user_id: UserId::new(row.user_id)?,
            body: CommentBody::new(row.comments)?,
            parent_comment_id: row.parent_comment_id.map(CommentId::new).transpose()?,
            active: row.active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn insert(&self, comment: NewComment) -> DomainResult<Comment> {
        let NewComment {
            article_id,
            user_id,
            body,
            parent_comment_id,
            created_at,
            updated_at,
        } = comment;

        let query = format!(
            "INSERT INTO article_comments (article_id, user_id, comments, parent_comment_id, active, created_at, updated_at)
             VALUES ($1, $2, $3, $4, TRUE, $5, $6)
             RETURNING {COMMENT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, CommentRow>(&query)
            .bind(i64::from(article_id))
            .bind(i64::from(user_id))
            .bind(body.as_str())
            .bind(parent_comment_id.map(i64::from))
            .bind(created_at)
            .bind(updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Comment::try_from(row)
    }

    async fn find_by_id(&self, id: CommentId) -> DomainResult<Option<Comment>> {
        let query = format!("SELECT {COMMENT_COLUMNS} FROM article_comments WHERE id = $1");
        let row = sqlx::query_as::<_, CommentRow>(&query)
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;
        row.map(Comment::try_from).transpose()
    }

    async fn update_body(
        &self,
        id: CommentId,
        body: CommentBody,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<Comment> {
        let query = format!(
            "UPDATE article_comments SET comments = $1, updated_at = $2
             WHERE id = $3 AND active = TRUE
             RETURNING {COMMENT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, CommentRow>(&query)
            .bind(body.as_str())
            .bind(updated_at)
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("comment not found".into()))?;

        Comment::try_from(row)
    }

    async fn soft_delete(
        &self,
        id: CommentId,
        cascade_replies: bool,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let result = sqlx::query(
            "UPDATE article_comments SET active = FALSE, updated_at = $1
             WHERE id = $2 AND active = TRUE",
        )
        .bind(updated_at)
        .bind(i64::from(id))
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("comment not found".into()));
        }

        if cascade_replies {
            sqlx::query(
                "UPDATE article_comments SET active = FALSE, updated_at = $1
                 WHERE parent_comment_id = $2 AND active = TRUE",
            )
            .bind(updated_at)
            .bind(i64::from(id))
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        }

        tx.commit().await.map_err(map_sqlx)?;
        Ok(())
    }

    async fn list_threads(&self, article_id: ArticleId) -> DomainResult<Vec<CommentThread>> {
        let roots_query = format!(
            "SELECT {COMMENT_COLUMNS} FROM article_comments
             WHERE article_id = $1 AND parent_comment_id IS NULL AND active = TRUE
             ORDER BY created_at DESC, id DESC"
        );
        let root_rows = sqlx::query_as::<_, CommentRow>(&roots_query)
            .bind(i64::from(article_id))
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let replies_query = format!(
            "SELECT {COMMENT_COLUMNS} FROM article_comments
             WHERE article_id = $1 AND parent_comment_id IS NOT NULL AND active = TRUE
             ORDER BY created_at ASC, id ASC"
        );
        let reply_rows = sqlx::query_as::<_, CommentRow>(&replies_query)
            .bind(i64::from(article_id))
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let mut replies_by_parent: std::collections::HashMap<i64, Vec<Comment>> =
            std::collections::HashMap::new();
        for row in reply_rows {
            let parent = row.parent_comment_id.unwrap_or_default();
            replies_by_parent
                .entry(parent)
                .or_default()
                .push(Comment::try_from(row)?);
        }

        root_rows
            .into_iter()
            .map(|row| {
                let root = Comment::try_from(row)?;
                let replies = replies_by_parent
                    .remove(&i64::from(root.id))
                    .unwrap_or_default();
                Ok(CommentThread { root, replies })
            })
            .collect()
    }
}
