// src/application/commands/articles/service.rs
use std::sync::Arc;

use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        article::{
            ArticleReadRepository, ArticleWriteRepository, CategoryAssignment, ImageUrl,
            NewArticleImage, services::ArticleSlugService,
        },
        category::CategoryId,
        user::{UserId, UserRepository},
    },
};

/// How many times a create/update is retried with a freshly generated slug
/// when the insert loses a slug race before the outcome surfaces as Conflict.
pub(super) const SLUG_RETRY_LIMIT: u32 = 3;

pub struct ArticleCommandService {
    pub(super) write_repo: Arc<dyn ArticleWriteRepository>,
    pub(super) read_repo: Arc<dyn ArticleReadRepository>,
    pub(super) user_repo: Arc<dyn UserRepository>,
    pub(super) slug_service: Arc<ArticleSlugService>,
    pub(super) clock: Arc<dyn Clock>,
}

impl ArticleCommandService {
    pub fn new(
        write_repo: Arc<dyn ArticleWriteRepository>,
        read_repo: Arc<dyn ArticleReadRepository>,
        user_repo: Arc<dyn UserRepository>,
        slug_service: Arc<ArticleSlugService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            user_repo,
            slug_service,
            clock,
        }
    }

    pub(super) async fn ensure_author_exists(&self, author_id: UserId) -> ApplicationResult<()> {
        self.user_repo
            .find_by_id(author_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("author not found"))?;
        Ok(())
    }
}

/// Image payload accepted by create/update; `order` defaults to the position
/// in the supplied list when absent.
#[derive(Debug, Clone, Default)]
pub struct ImageInput {
    pub image_url: String,
    pub alt_text: Option<String>,
    pub caption: Option<String>,
    pub order: Option<i32>,
}

pub(super) fn build_images(inputs: Vec<ImageInput>) -> ApplicationResult<Vec<NewArticleImage>> {
    inputs
        .into_iter()
        .enumerate()
        .map(|(position, input)| {
            Ok(NewArticleImage {
                image_url: ImageUrl::new(input.image_url)?,
                alt_text: input.alt_text,
                caption: input.caption,
                order: input.order.unwrap_or(position as i32),
            })
        })
        .collect()
}

/// Turn caller-supplied category ids into assignments, flagging exactly one
/// as primary. The designated primary must be one of the supplied ids; when
/// none is designated, the first id keeps the role the original display
/// convention gave it.
pub(super) fn build_category_assignments(
    category_ids: Vec<i64>,
    primary_category_id: Option<i64>,
) -> ApplicationResult<Vec<CategoryAssignment>> {
    let ids = category_ids
        .into_iter()
        .map(CategoryId::new)
        .collect::<Result<Vec<_>, _>>()?;

    let primary = match primary_category_id {
        Some(raw) => {
            let id = CategoryId::new(raw)?;
            if !ids.contains(&id) {
                return Err(ApplicationError::validation(
                    "primary category must be one of the assigned categories",
                ));
            }
            Some(id)
        }
        None => ids.first().copied(),
    };

    Ok(ids
        .into_iter()
        .map(|category_id| CategoryAssignment {
            category_id,
            is_primary: Some(category_id) == primary,
        })
        .collect())
}
