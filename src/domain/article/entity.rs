// src/domain/article/entity.rs
use crate::domain::article::value_objects::{
    ArticleId, ArticleSlug, ArticleTitle, HtmlBody, ImageUrl,
};
use crate::domain::category::{Category, CategoryId};
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Article {
    pub id: ArticleId,
    pub title: ArticleTitle,
    pub slug: ArticleSlug,
    pub content_html: HtmlBody,
    pub province: Option<String>,
    pub city: Option<String>,
    pub thumbnail_url: Option<String>,
    pub active: bool,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    pub fn deactivate(&mut self, now: DateTime<Utc>) {
        self.active = false;
        self.updated_at = now;
    }

    pub fn restore(&mut self, now: DateTime<Utc>) {
        self.active = true;
        self.updated_at = now;
    }

    pub fn set_slug(&mut self, slug: ArticleSlug, now: DateTime<Utc>) {
        self.slug = slug;
        self.updated_at = now;
    }
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: ArticleTitle,
    pub slug: ArticleSlug,
    pub content_html: HtmlBody,
    pub province: Option<String>,
    pub city: Option<String>,
    pub thumbnail_url: Option<String>,
    pub active: bool,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Image row owned by exactly one article. Rows are replaced wholesale when
/// an update supplies a new image set.
#[derive(Debug, Clone)]
pub struct ArticleImage {
    pub id: i64,
    pub article_id: ArticleId,
    pub image_url: ImageUrl,
    pub alt_text: Option<String>,
    pub caption: Option<String>,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewArticleImage {
    pub image_url: ImageUrl,
    pub alt_text: Option<String>,
    pub caption: Option<String>,
    pub order: i32,
}

impl NewArticleImage {
    pub fn from_url(image_url: ImageUrl, order: i32) -> Self {
        Self {
            image_url,
            alt_text: None,
            caption: None,
            order,
        }
    }
}

/// Join-row request linking an article to a category. At most one assignment
/// per pair may carry `is_primary = true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryAssignment {
    pub category_id: CategoryId,
    pub is_primary: bool,
}

#[derive(Debug, Clone)]
pub struct CategoryMapping {
    pub category: Category,
    pub is_primary: bool,
}

/// An article together with its owned images (in display order) and category
/// mappings, loaded and persisted as one consistency unit.
#[derive(Debug, Clone)]
pub struct ArticleAggregate {
    pub article: Article,
    pub images: Vec<ArticleImage>,
    pub categories: Vec<CategoryMapping>,
}

impl ArticleAggregate {
    /// The mapping flagged primary, if any.
    pub fn primary_category(&self) -> Option<&Category> {
        self.categories
            .iter()
            .find(|mapping| mapping.is_primary)
            .map(|mapping| &mapping.category)
    }
}

/// Partial update of article scalar fields. `None` leaves a column untouched;
/// nullable columns use a nested `Option` so "clear" and "keep" stay distinct.
#[derive(Debug, Clone, Default)]
pub struct ArticleFieldUpdate {
    pub title: Option<ArticleTitle>,
    pub slug: Option<ArticleSlug>,
    pub content_html: Option<HtmlBody>,
    pub province: Option<Option<String>>,
    pub city: Option<Option<String>>,
    pub thumbnail_url: Option<Option<String>>,
    pub active: Option<bool>,
}

impl ArticleFieldUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.slug.is_none()
            && self.content_html.is_none()
            && self.province.is_none()
            && self.city.is_none()
            && self.thumbnail_url.is_none()
            && self.active.is_none()
    }

    pub fn with_title(mut self, title: ArticleTitle) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_slug(mut self, slug: ArticleSlug) -> Self {
        self.slug = Some(slug);
        self
    }

    pub fn with_content(mut self, content_html: HtmlBody) -> Self {
        self.content_html = Some(content_html);
        self
    }

    pub fn with_province(mut self, province: Option<String>) -> Self {
        self.province = Some(province);
        self
    }

    pub fn with_city(mut self, city: Option<String>) -> Self {
        self.city = Some(city);
        self
    }

    pub fn with_thumbnail_url(mut self, thumbnail_url: Option<String>) -> Self {
        self.thumbnail_url = Some(thumbnail_url);
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }
}
