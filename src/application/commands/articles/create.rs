// src/application/commands/articles/create.rs
use super::service::{
    ArticleCommandService, ImageInput, SLUG_RETRY_LIMIT, build_category_assignments, build_images,
};
use crate::{
    application::{
        dto::ArticleDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        article::{ArticleTitle, HtmlBody, NewArticle},
        errors::DomainError,
        user::UserId,
    },
};

pub struct CreateArticleCommand {
    pub title: String,
    pub content_html: String,
    pub province: Option<String>,
    pub city: Option<String>,
    pub active: bool,
    pub category_ids: Vec<i64>,
    pub primary_category_id: Option<i64>,
    pub images: Vec<ImageInput>,
    pub author_id: i64,
}

impl CreateArticleCommand {
    pub fn builder() -> CreateArticleCommandBuilder {
        CreateArticleCommandBuilder::default()
    }
}

pub struct CreateArticleCommandBuilder {
    title: Option<String>,
    content_html: Option<String>,
    province: Option<String>,
    city: Option<String>,
    active: bool,
    category_ids: Vec<i64>,
    primary_category_id: Option<i64>,
    images: Vec<ImageInput>,
    author_id: Option<i64>,
}

impl Default for CreateArticleCommandBuilder {
    fn default() -> Self {
        Self {
            title: None,
            content_html: None,
            province: None,
            city: None,
            active: true,
            category_ids: Vec::new(),
            primary_category_id: None,
            images: Vec::new(),
            author_id: None,
        }
    }
}

impl CreateArticleCommandBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content_html(mut self, content_html: impl Into<String>) -> Self {
        self.content_html = Some(content_html.into());
        self
    }

    pub fn province(mut self, province: impl Into<String>) -> Self {
        self.province = Some(province.into());
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn category_ids(mut self, category_ids: Vec<i64>) -> Self {
        self.category_ids = category_ids;
        self
    }

    pub fn primary_category_id(mut self, id: i64) -> Self {
        self.primary_category_id = Some(id);
        self
    }

    pub fn images(mut self, images: Vec<ImageInput>) -> Self {
        self.images = images;
        self
    }

    pub fn author_id(mut self, author_id: i64) -> Self {
        self.author_id = Some(author_id);
        self
    }

    pub fn build(self) -> Result<CreateArticleCommand, &'static str> {
        Ok(CreateArticleCommand {
            title: self.title.ok_or("title is required")?,
            content_html: self.content_html.ok_or("content_html is required")?,
            province: self.province,
            city: self.city,
            active: self.active,
            category_ids: self.category_ids,
            primary_category_id: self.primary_category_id,
            images: self.images,
            author_id: self.author_id.ok_or("author_id is required")?,
        })
    }
}

/// A slug unique-violation reported by the storage layer; anything else is
/// not retryable here.
pub(super) fn is_slug_conflict(err: &ApplicationError) -> bool {
    matches!(
        err,
        ApplicationError::Domain(DomainError::Conflict(msg)) if msg.contains("slug")
    )
}

impl ArticleCommandService {
    pub async fn create_article(
        &self,
        command: CreateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let title = ArticleTitle::new(command.title)?;
        let content_html = HtmlBody::new(command.content_html)?;
        let author_id = UserId::new(command.author_id)?;
        self.ensure_author_exists(author_id).await?;

        let categories =
            build_category_assignments(command.category_ids, command.primary_category_id)?;
        let images = build_images(command.images)?;
        let thumbnail_url = images
            .first()
            .map(|image| image.image_url.as_str().to_string());

        // The slug probe and the insert cannot share one transaction across
        // the repository seam, so a lost race surfaces as a slug conflict and
        // is resolved by probing again.
        let mut attempt = 0;
        loop {
            let slug = self.slug_service.generate_unique_slug(&title, None).await?;
            let now = self.clock.now();
            let new_article = NewArticle {
                title: title.clone(),
                slug,
                content_html: content_html.clone(),
                province: command.province.clone(),
                city: command.city.clone(),
                thumbnail_url: thumbnail_url.clone(),
                active: command.active,
                author_id,
                created_at: now,
                updated_at: now,
            };

            match self
                .write_repo
                .create_aggregate(new_article, images.clone(), categories.clone())
                .await
            {
                Ok(aggregate) => return Ok(aggregate.into()),
                Err(err) => {
                    let err = ApplicationError::from(err);
                    attempt += 1;
                    if is_slug_conflict(&err) && attempt < SLUG_RETRY_LIMIT {
                        tracing::debug!(attempt, "slug race lost, regenerating");
                        continue;
                    }
                    return Err(err);
                }
            }
        }
    }
}
