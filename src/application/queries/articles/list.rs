use super::service::ArticleQueryService;
use crate::{
    application::{
        dto::{ArticleDto, CursorPage},
        error::ApplicationResult,
    },
    domain::{
        article::{ArticleListCursor, ArticleListFilter},
        user::UserId,
    },
};

pub struct ListArticlesQuery {
    pub limit: u32,
    pub cursor: Option<String>,
    pub include_inactive: bool,
    pub province: Option<String>,
    pub city: Option<String>,
    pub author_id: Option<i64>,
    pub search: Option<String>,
}

impl Default for ListArticlesQuery {
    fn default() -> Self {
        Self {
            limit: 10,
            cursor: None,
            include_inactive: false,
            province: None,
            city: None,
            author_id: None,
            search: None,
        }
    }
}

impl ArticleQueryService {
    pub async fn list(
        &self,
        query: ListArticlesQuery,
    ) -> ApplicationResult<CursorPage<ArticleDto>> {
        let cursor = query
            .cursor
            .as_deref()
            .map(ArticleListCursor::decode)
            .transpose()?;

        let filter = ArticleListFilter {
            include_inactive: query.include_inactive,
            province: query.province,
            city: query.city,
            author_id: query.author_id.map(UserId::new).transpose()?,
            search: query.search,
        };

        let (aggregates, next_cursor) = self
            .read_repo
            .list_page(&filter, query.limit, cursor)
            .await?;

        Ok(CursorPage::new(
            aggregates.into_iter().map(Into::into).collect(),
            next_cursor.map(|cursor| cursor.encode()),
        ))
    }
}
