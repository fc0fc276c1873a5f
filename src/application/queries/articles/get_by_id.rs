// src/application/queries/articles/get_by_id.rs
use super::service::ArticleQueryService;
use crate::{
    application::{
        dto::ArticleDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::ArticleId,
};

pub struct GetArticleByIdQuery {
    pub id: i64,
    /// Owners and moderation tooling may read soft-deleted articles.
    pub include_inactive: bool,
}

impl ArticleQueryService {
    pub async fn get_by_id(&self, query: GetArticleByIdQuery) -> ApplicationResult<ArticleDto> {
        let id = ArticleId::new(query.id)?;
        let aggregate = self
            .read_repo
            .find_by_id(id)
            .await?
            .filter(|aggregate| aggregate.article.active || query.include_inactive)
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;
        Ok(aggregate.into())
    }
}
