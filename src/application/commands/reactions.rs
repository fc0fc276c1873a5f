// src/application/commands/reactions.rs
use std::sync::Arc;

use crate::{
    application::{
        dto::ReactionStatusDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        article::{ArticleId, ArticleReadRepository},
        reaction::{ReactionKind, ReactionRepository},
        user::{UserId, UserRepository},
    },
};

pub struct ToggleReactionCommand {
    pub kind: ReactionKind,
    pub article_id: i64,
    pub user_id: i64,
}

pub struct ReactionCommandService {
    reaction_repo: Arc<dyn ReactionRepository>,
    article_repo: Arc<dyn ArticleReadRepository>,
    user_repo: Arc<dyn UserRepository>,
}

impl ReactionCommandService {
    pub fn new(
        reaction_repo: Arc<dyn ReactionRepository>,
        article_repo: Arc<dyn ArticleReadRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            reaction_repo,
            article_repo,
            user_repo,
        }
    }

    /// Flip the like/save state for (user, article) and report the new state
    /// with the updated total.
    pub async fn toggle(
        &self,
        command: ToggleReactionCommand,
    ) -> ApplicationResult<ReactionStatusDto> {
        let article_id = ArticleId::new(command.article_id)?;
        let user_id = UserId::new(command.user_id)?;

        let aggregate = self
            .article_repo
            .find_by_id(article_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;
        if !aggregate.article.active {
            return Err(ApplicationError::not_found("article not found"));
        }

        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("user not found"))?;

        let status = self
            .reaction_repo
            .toggle(command.kind, article_id, user_id)
            .await?;
        tracing::debug!(
            kind = command.kind.as_str(),
            article_id = i64::from(article_id),
            reacted = status.reacted,
            total = status.total,
            "reaction toggled"
        );
        Ok(status.into())
    }
}
