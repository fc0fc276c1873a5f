// src/application/queries/comments.rs
use std::sync::Arc;

use crate::{
    application::{
        dto::CommentThreadDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        article::{ArticleId, ArticleReadRepository},
        comment::CommentRepository,
    },
};

pub struct ListCommentThreadsQuery {
    pub article_id: i64,
}

pub struct CommentQueryService {
    comment_repo: Arc<dyn CommentRepository>,
    article_repo: Arc<dyn ArticleReadRepository>,
}

impl CommentQueryService {
    pub fn new(
        comment_repo: Arc<dyn CommentRepository>,
        article_repo: Arc<dyn ArticleReadRepository>,
    ) -> Self {
        Self {
            comment_repo,
            article_repo,
        }
    }

    /// Active root comments with their active replies for one article.
    pub async fn list_threads(
        &self,
        query: ListCommentThreadsQuery,
    ) -> ApplicationResult<Vec<CommentThreadDto>> {
        let article_id = ArticleId::new(query.article_id)?;
        self.article_repo
            .find_by_id(article_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        let threads = self.comment_repo.list_threads(article_id).await?;
        Ok(threads.into_iter().map(Into::into).collect())
    }
}
