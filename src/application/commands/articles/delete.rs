// src/application/commands/articles/delete.rs
use super::service::ArticleCommandService;
use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::article::ArticleId,
};

pub struct SoftDeleteArticleCommand {
    pub id: i64,
}

pub struct RestoreArticleCommand {
    pub id: i64,
}

pub struct HardDeleteArticleCommand {
    pub id: i64,
}

impl ArticleCommandService {
    /// Marks the article inactive, hiding it from public reads while keeping
    /// the row and all dependents.
    pub async fn soft_delete_article(
        &self,
        command: SoftDeleteArticleCommand,
    ) -> ApplicationResult<()> {
        let id = ArticleId::new(command.id)?;
        self.write_repo
            .set_active(id, false, self.clock.now())
            .await?;
        Ok(())
    }

    /// Reverses a soft delete. Fails when the article is already active.
    pub async fn restore_article(&self, command: RestoreArticleCommand) -> ApplicationResult<()> {
        let id = ArticleId::new(command.id)?;
        let aggregate = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        if aggregate.article.active {
            return Err(ApplicationError::validation("article is already active"));
        }

        self.write_repo
            .set_active(id, true, self.clock.now())
            .await?;
        Ok(())
    }

    /// Deletes the article and all dependent rows. Irreversible.
    pub async fn hard_delete_article(
        &self,
        command: HardDeleteArticleCommand,
    ) -> ApplicationResult<()> {
        let id = ArticleId::new(command.id)?;
        self.write_repo.hard_delete(id).await?;
        tracing::info!(article_id = i64::from(id), "article hard-deleted");
        Ok(())
    }
}
