use super::service::ArticleQueryService;
use crate::{
    application::{
        dto::ArticleDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::ArticleSlug,
};

pub struct GetArticleBySlugQuery {
    pub slug: String,
    pub include_inactive: bool,
}

impl ArticleQueryService {
    pub async fn get_by_slug(&self, query: GetArticleBySlugQuery) -> ApplicationResult<ArticleDto> {
        let slug = ArticleSlug::new(query.slug)?;
        let aggregate = self
            .read_repo
            .find_by_slug(&slug)
            .await?
            .filter(|aggregate| aggregate.article.active || query.include_inactive)
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;
        Ok(aggregate.into())
    }
}
