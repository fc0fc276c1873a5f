use crate::domain::article::entity::{
    ArticleAggregate, ArticleFieldUpdate, CategoryAssignment, NewArticle, NewArticleImage,
};
use crate::domain::article::value_objects::{ArticleId, ArticleListCursor, ArticleSlug};
use crate::domain::errors::DomainResult;
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Write side of the article aggregate. Every method that touches more than
/// one table runs inside a single database transaction; a failure in any step
/// rolls the whole operation back.
#[async_trait]
pub trait ArticleWriteRepository: Send + Sync {
    /// Insert the article row, then its category mappings and images, as one
    /// atomic unit. Rejects unknown category ids before writing mappings.
    async fn create_aggregate(
        &self,
        article: NewArticle,
        images: Vec<NewArticleImage>,
        categories: Vec<CategoryAssignment>,
    ) -> DomainResult<ArticleAggregate>;

    /// Apply a partial field update; when `images` or `categories` is
    /// supplied (even empty) the existing set is deleted and replaced.
    async fn update_aggregate(
        &self,
        id: ArticleId,
        fields: ArticleFieldUpdate,
        images: Option<Vec<NewArticleImage>>,
        categories: Option<Vec<CategoryAssignment>>,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<ArticleAggregate>;

    /// Soft-delete (`active = false`) or restore (`active = true`) the
    /// article row without touching dependents.
    async fn set_active(
        &self,
        id: ArticleId,
        active: bool,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<()>;

    /// Remove the article and every dependent row (images, likes, saves,
    /// comments and their replies, category mappings) in dependency order
    /// within one transaction. Irreversible.
    async fn hard_delete(&self, id: ArticleId) -> DomainResult<()>;
}

#[derive(Debug, Clone, Default)]
pub struct ArticleListFilter {
    pub include_inactive: bool,
    pub province: Option<String>,
    pub city: Option<String>,
    pub author_id: Option<UserId>,
    pub search: Option<String>,
}

#[async_trait]
pub trait ArticleReadRepository: Send + Sync {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<ArticleAggregate>>;
    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<ArticleAggregate>>;
    /// Cheap existence probe used by slug generation; returns the owning
    /// article id when the slug is taken.
    async fn slug_owner(&self, slug: &ArticleSlug) -> DomainResult<Option<ArticleId>>;
    async fn list_page(
        &self,
        filter: &ArticleListFilter,
        limit: u32,
        cursor: Option<ArticleListCursor>,
    ) -> DomainResult<(Vec<ArticleAggregate>, Option<ArticleListCursor>)>;
}
