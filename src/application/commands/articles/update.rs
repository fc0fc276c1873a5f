use super::create::is_slug_conflict;
use super::service::{
    ArticleCommandService, ImageInput, SLUG_RETRY_LIMIT, build_category_assignments, build_images,
};
use crate::{
    application::{
        dto::ArticleDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::{ArticleFieldUpdate, ArticleId, ArticleTitle, HtmlBody},
};

/// Partial update: `None` leaves a field untouched. Supplying `images` or
/// `category_ids` (even empty) replaces the whole owned set.
pub struct UpdateArticleCommand {
    pub id: i64,
    pub title: Option<String>,
    pub content_html: Option<String>,
    pub province: Option<Option<String>>,
    pub city: Option<Option<String>>,
    pub active: Option<bool>,
    pub category_ids: Option<Vec<i64>>,
    pub primary_category_id: Option<i64>,
    pub images: Option<Vec<ImageInput>>,
}

impl UpdateArticleCommand {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            title: None,
            content_html: None,
            province: None,
            city: None,
            active: None,
            category_ids: None,
            primary_category_id: None,
            images: None,
        }
    }
}

impl ArticleCommandService {
    pub async fn update_article(
        &self,
        command: UpdateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let id = ArticleId::new(command.id)?;
        let existing = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        let UpdateArticleCommand {
            id: _,
            title,
            content_html,
            province,
            city,
            active,
            category_ids,
            primary_category_id,
            images,
        } = command;

        if primary_category_id.is_some() && category_ids.is_none() {
            return Err(ApplicationError::validation(
                "primary category can only be set together with the category list",
            ));
        }

        let title_changed = title
            .as_deref()
            .is_some_and(|t| t != existing.article.title.as_str());
        let title = title.map(ArticleTitle::new).transpose()?;

        let mut fields = ArticleFieldUpdate::default();
        if let Some(title) = title.clone() {
            fields = fields.with_title(title);
        }
        if let Some(content_html) = content_html {
            fields = fields.with_content(HtmlBody::new(content_html)?);
        }
        if let Some(province) = province {
            fields = fields.with_province(province);
        }
        if let Some(city) = city {
            fields = fields.with_city(city);
        }
        if let Some(active) = active {
            fields = fields.with_active(active);
        }

        let new_images = images.map(build_images).transpose()?;
        if let Some(images) = &new_images {
            // Keep the thumbnail pointing at the first image of the new set;
            // an emptied set also clears it.
            fields = fields.with_thumbnail_url(
                images
                    .first()
                    .map(|image| image.image_url.as_str().to_string()),
            );
        }

        let categories = category_ids
            .map(|ids| build_category_assignments(ids, primary_category_id))
            .transpose()?;

        let mut attempt = 0;
        loop {
            let mut fields = fields.clone();
            if title_changed {
                let slug = self
                    .slug_service
                    .generate_unique_slug(
                        title.as_ref().unwrap_or(&existing.article.title),
                        Some(id),
                    )
                    .await?;
                fields = fields.with_slug(slug);
            }

            match self
                .write_repo
                .update_aggregate(
                    id,
                    fields,
                    new_images.clone(),
                    categories.clone(),
                    self.clock.now(),
                )
                .await
            {
                Ok(aggregate) => return Ok(aggregate.into()),
                Err(err) => {
                    let err = ApplicationError::from(err);
                    attempt += 1;
                    if title_changed && is_slug_conflict(&err) && attempt < SLUG_RETRY_LIMIT {
                        tracing::debug!(attempt, "slug race lost on update, regenerating");
                        continue;
                    }
                    return Err(err);
                }
            }
        }
    }
}
