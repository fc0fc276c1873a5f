// src/application/commands/comments/service.rs
use std::sync::Arc;

use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        article::{ArticleId, ArticleReadRepository},
        comment::{Comment, CommentId, CommentRepository},
        user::{UserId, UserRepository},
    },
};

pub struct CommentCommandService {
    pub(super) comment_repo: Arc<dyn CommentRepository>,
    pub(super) article_repo: Arc<dyn ArticleReadRepository>,
    pub(super) user_repo: Arc<dyn UserRepository>,
    pub(super) clock: Arc<dyn Clock>,
}

impl CommentCommandService {
    pub fn new(
        comment_repo: Arc<dyn CommentRepository>,
        article_repo: Arc<dyn ArticleReadRepository>,
        user_repo: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            comment_repo,
            article_repo,
            user_repo,
            clock,
        }
    }

    /// Comments only attach to articles that exist and are publicly visible.
    pub(super) async fn ensure_article_active(&self, id: ArticleId) -> ApplicationResult<()> {
        let aggregate = self
            .article_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;
        if !aggregate.article.active {
            return Err(ApplicationError::not_found("article not found"));
        }
        Ok(())
    }

    pub(super) async fn ensure_user_exists(&self, id: UserId) -> ApplicationResult<()> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("user not found"))?;
        Ok(())
    }

    /// Loads an active comment and checks the caller authored it.
    pub(super) async fn load_owned_comment(
        &self,
        comment_id: CommentId,
        user_id: UserId,
    ) -> ApplicationResult<Comment> {
        let comment = self
            .comment_repo
            .find_by_id(comment_id)
            .await?
            .filter(|comment| comment.active)
            .ok_or_else(|| ApplicationError::not_found("comment not found"))?;

        if comment.user_id != user_id {
            return Err(ApplicationError::forbidden(
                "only the comment author may modify it",
            ));
        }

        Ok(comment)
    }
}
