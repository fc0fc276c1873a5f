use crate::domain::article::{ArticleAggregate, ArticleImage, CategoryMapping};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleImageDto {
    pub id: i64,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    pub order: i32,
}

impl From<ArticleImage> for ArticleImageDto {
    fn from(image: ArticleImage) -> Self {
        Self {
            id: image.id,
            image_url: image.image_url.into(),
            alt_text: image.alt_text,
            caption: image.caption,
            order: image.order,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryMappingDto {
    pub category: super::CategoryDto,
    pub is_primary: bool,
}

impl From<CategoryMapping> for CategoryMappingDto {
    fn from(mapping: CategoryMapping) -> Self {
        Self {
            category: mapping.category.into(),
            is_primary: mapping.is_primary,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleDto {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub content_html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    pub active: bool,
    pub author_id: i64,
    pub images: Vec<ArticleImageDto>,
    pub categories: Vec<CategoryMappingDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ArticleAggregate> for ArticleDto {
    fn from(aggregate: ArticleAggregate) -> Self {
        let article = aggregate.article;
        Self {
            id: article.id.into(),
            title: article.title.into(),
            slug: article.slug.into(),
            content_html: article.content_html.into(),
            province: article.province,
            city: article.city,
            thumbnail_url: article.thumbnail_url,
            active: article.active,
            author_id: article.author_id.into(),
            images: aggregate.images.into_iter().map(Into::into).collect(),
            categories: aggregate.categories.into_iter().map(Into::into).collect(),
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}
