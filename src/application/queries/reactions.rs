// src/application/queries/reactions.rs
use std::sync::Arc;

use crate::{
    application::{
        dto::ReactionStatusDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        article::{ArticleId, ArticleReadRepository},
        reaction::{ReactionKind, ReactionRepository},
        user::UserId,
    },
};

pub struct ReactionStatusQuery {
    pub kind: ReactionKind,
    pub article_id: i64,
    pub user_id: i64,
}

pub struct ReactionQueryService {
    reaction_repo: Arc<dyn ReactionRepository>,
    article_repo: Arc<dyn ArticleReadRepository>,
}

impl ReactionQueryService {
    pub fn new(
        reaction_repo: Arc<dyn ReactionRepository>,
        article_repo: Arc<dyn ArticleReadRepository>,
    ) -> Self {
        Self {
            reaction_repo,
            article_repo,
        }
    }

    /// Whether the user has liked/saved the article, plus the current total.
    pub async fn status(
        &self,
        query: ReactionStatusQuery,
    ) -> ApplicationResult<ReactionStatusDto> {
        let article_id = ArticleId::new(query.article_id)?;
        let user_id = UserId::new(query.user_id)?;

        self.article_repo
            .find_by_id(article_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        let status = self
            .reaction_repo
            .status(query.kind, article_id, user_id)
            .await?;
        Ok(status.into())
    }
}
