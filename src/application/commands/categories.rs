// src/application/commands/categories.rs
use std::sync::Arc;

use crate::{
    application::{
        dto::CategoryDto,
        error::ApplicationResult,
        ports::{time::Clock, util::SlugGenerator},
    },
    domain::{
        category::{Category, CategoryName, CategoryRepository, CategorySlug, HexColor, NewCategory},
        errors::DomainError,
    },
};

pub struct CreateCategoryCommand {
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
}

/// Find-or-create categories by name, returning them in input order. This is
/// the single entry point for name-based callers; the aggregate writer only
/// accepts category ids.
pub struct ResolveCategoriesCommand {
    pub names: Vec<String>,
}

pub struct CategoryCommandService {
    repo: Arc<dyn CategoryRepository>,
    slugger: Arc<dyn SlugGenerator>,
    clock: Arc<dyn Clock>,
}

impl CategoryCommandService {
    pub fn new(
        repo: Arc<dyn CategoryRepository>,
        slugger: Arc<dyn SlugGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repo,
            slugger,
            clock,
        }
    }

    pub async fn create_category(
        &self,
        command: CreateCategoryCommand,
    ) -> ApplicationResult<CategoryDto> {
        let name = CategoryName::new(command.name)?;
        let color = command.color.map(HexColor::new).transpose()?;
        let category = self
            .insert_category(name, command.description, color)
            .await?;
        Ok(category.into())
    }

    pub async fn resolve_categories(
        &self,
        command: ResolveCategoriesCommand,
    ) -> ApplicationResult<Vec<CategoryDto>> {
        let mut resolved = Vec::with_capacity(command.names.len());
        for raw in command.names {
            let name = CategoryName::new(raw)?;
            resolved.push(self.find_or_create(name).await?.into());
        }
        Ok(resolved)
    }

    /// Lookup by normalised name, creating the row on first use. A
    /// unique-violation on create means another transaction won the race, so
    /// the winner's row is fetched instead of surfacing the conflict.
    async fn find_or_create(&self, name: CategoryName) -> ApplicationResult<Category> {
        if let Some(existing) = self.repo.find_by_name(&name).await? {
            return Ok(existing);
        }

        match self.insert_category(name.clone(), None, None).await {
            Ok(created) => Ok(created),
            Err(DomainError::Conflict(_)) => {
                tracing::debug!(name = name.as_str(), "category create race lost, re-querying");
                self.repo.find_by_name(&name).await?.ok_or_else(|| {
                    DomainError::Conflict(format!(
                        "category '{name}' creation raced and lookup failed"
                    ))
                    .into()
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn insert_category(
        &self,
        name: CategoryName,
        description: Option<String>,
        color: Option<HexColor>,
    ) -> Result<Category, DomainError> {
        let slug = self.unique_slug(&name).await?;
        let now = self.clock.now();
        self.repo
            .insert(NewCategory {
                name,
                slug,
                description,
                color,
                active: true,
                created_at: now,
                updated_at: now,
            })
            .await
    }

    /// Distinct names can slugify to the same value ("foo bar" after
    /// "foo-bar"), so category slugs get the same `-1`, `-2`, … probe loop
    /// that article slugs use. The slug unique constraint stays the backstop
    /// for concurrent creations.
    async fn unique_slug(&self, name: &CategoryName) -> Result<CategorySlug, DomainError> {
        let base = self.slugger.slugify(name.as_str());
        let base = if base.is_empty() {
            format!("category-{}", self.clock.now().timestamp())
        } else {
            base
        };

        let mut candidate = base.clone();
        let mut counter = 1u64;
        loop {
            let slug = CategorySlug::new(candidate)?;
            if self.repo.find_by_slug(&slug).await?.is_none() {
                return Ok(slug);
            }
            candidate = format!("{base}-{counter}");
            counter += 1;
        }
    }
}
