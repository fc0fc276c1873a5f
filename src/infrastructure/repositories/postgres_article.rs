// src/infrastructure/repositories/postgres_article.rs
use std::collections::HashMap;

use super::error::map_sqlx;
use crate::domain::article::{
    Article, ArticleAggregate, ArticleFieldUpdate, ArticleId, ArticleImage, ArticleListCursor,
    ArticleListFilter, ArticleReadRepository, ArticleSlug, ArticleTitle, ArticleWriteRepository,
    CategoryAssignment, CategoryMapping, HtmlBody, ImageUrl, NewArticle, NewArticleImage,
};
use crate::domain::category::{Category, CategoryId, CategoryName, CategorySlug, HexColor};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool, Postgres, QueryBuilder};

const ARTICLE_COLUMNS: &str = "id, title, slug, content_html, province, city, thumbnail_url, \
     active, author_id, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresArticleWriteRepository {
    pool: PgPool,
}

impl PostgresArticleWriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresArticleReadRepository {
    pool: PgPool,
}

impl PostgresArticleReadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ArticleRow {
    id: i64,
    title: String,
    slug: String,
    content_html: String,
    province: Option<String>,
    city: Option<String>,
    thumbnail_url: Option<String>,
    active: bool,
    author_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ArticleRow> for Article {
    type Error = DomainError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        Ok(Article {
            id: ArticleId::new(row.id)?,
            title: ArticleTitle::new(row.title)?,
            slug: ArticleSlug::new(row.slug)?,
            content_html: HtmlBody::new(row.content_html)?,
            province: row.province,
            city: row.city,
            thumbnail_url: row.thumbnail_url,
            active: row.active,
            author_id: UserId::new(row.author_id)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct ArticleImageRow {
    id: i64,
    article_id: i64,
    image_url: String,
    alt_text: Option<String>,
    caption: Option<String>,
    #[sqlx(rename = "order")]
    order: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ArticleImageRow> for ArticleImage {
    type Error = DomainError;

    fn try_from(row: ArticleImageRow) -> Result<Self, Self::Error> {
        Ok(ArticleImage {
            id: row.id,
            article_id: ArticleId::new(row.article_id)?,
            image_url: ImageUrl::new(row.image_url)?,
            alt_text: row.alt_text,
            caption: row.caption,
            order: row.order,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct CategoryMappingRow {
    article_id: i64,
    is_primary: bool,
    category_id: i64,
    name: String,
    slug: String,
    description: Option<String>,
    color: Option<String>,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CategoryMappingRow> for CategoryMapping {
    type Error = DomainError;

    fn try_from(row: CategoryMappingRow) -> Result<Self, Self::Error> {
        Ok(CategoryMapping {
            category: Category {
                id: CategoryId::new(row.category_id)?,
                name: CategoryName::new(row.name)?,
                slug: CategorySlug::new(row.slug)?,
                description: row.description,
                color: row.color.map(HexColor::new).transpose()?,
                active: row.active,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            is_primary: row.is_primary,
        })
    }
}

async fn fetch_images(
    conn: &mut PgConnection,
    article_ids: &[i64],
) -> DomainResult<HashMap<i64, Vec<ArticleImage>>> {
    let rows = sqlx::query_as::<_, ArticleImageRow>(
        "SELECT id, article_id, image_url, alt_text, caption, \"order\", created_at, updated_at
         FROM article_images WHERE article_id = ANY($1)
         ORDER BY \"order\" ASC, id ASC",
    )
    .bind(article_ids)
    .fetch_all(conn)
    .await
    .map_err(map_sqlx)?;

    let mut grouped: HashMap<i64, Vec<ArticleImage>> = HashMap::new();
    for row in rows {
        let article_id = row.article_id;
        grouped
            .entry(article_id)
            .or_default()
            .push(ArticleImage::try_from(row)?);
    }
    Ok(grouped)
}

async fn fetch_category_mappings(
    conn: &mut PgConnection,
    article_ids: &[i64],
) -> DomainResult<HashMap<i64, Vec<CategoryMapping>>> {
    let rows = sqlx::query_as::<_, CategoryMappingRow>(
        "SELECT m.article_id, m.is_primary, c.id AS category_id, c.name, c.slug,
                c.description, c.color, c.active, c.created_at, c.updated_at
         FROM article_category_maps m
         JOIN categories c ON c.id = m.category_id
         WHERE m.article_id = ANY($1)
         ORDER BY m.is_primary DESC, m.id ASC",
    )
    .bind(article_ids)
    .fetch_all(conn)
    .await
    .map_err(map_sqlx)?;

    let mut grouped: HashMap<i64, Vec<CategoryMapping>> = HashMap::new();
    for row in rows {
        let article_id = row.article_id;
        grouped
            .entry(article_id)
            .or_default()
            .push(CategoryMapping::try_from(row)?);
    }
    Ok(grouped)
}

/// Load one aggregate through the given connection, so callers inside a
/// transaction observe their own uncommitted writes.
async fn fetch_aggregate(
    conn: &mut PgConnection,
    id: ArticleId,
) -> DomainResult<Option<ArticleAggregate>> {
    let query = format!("SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = $1");
    let row = sqlx::query_as::<_, ArticleRow>(&query)
        .bind(i64::from(id))
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_sqlx)?;

    let Some(row) = row else {
        return Ok(None);
    };

    let article = Article::try_from(row)?;
    let ids = [i64::from(article.id)];
    let mut images = fetch_images(&mut *conn, &ids).await?;
    let mut categories = fetch_category_mappings(&mut *conn, &ids).await?;

    Ok(Some(ArticleAggregate {
        images: images.remove(&ids[0]).unwrap_or_default(),
        categories: categories.remove(&ids[0]).unwrap_or_default(),
        article,
    }))
}

/// Reject the write when any supplied category id has no row, so the
/// surrounding transaction rolls back before mappings are inserted.
async fn ensure_categories_exist(
    conn: &mut PgConnection,
    categories: &[CategoryAssignment],
) -> DomainResult<()> {
    if categories.is_empty() {
        return Ok(());
    }
    let ids: Vec<i64> = categories
        .iter()
        .map(|assignment| i64::from(assignment.category_id))
        .collect();
    let found: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories WHERE id = ANY($1)")
        .bind(&ids)
        .fetch_one(conn)
        .await
        .map_err(map_sqlx)?;
    if found as usize != ids.len() {
        return Err(DomainError::NotFound(
            "one or more categories not found".into(),
        ));
    }
    Ok(())
}

async fn insert_category_mappings(
    conn: &mut PgConnection,
    article_id: i64,
    categories: &[CategoryAssignment],
) -> DomainResult<()> {
    for assignment in categories {
        sqlx::query(
            "INSERT INTO article_category_maps (article_id, category_id, is_primary)
             VALUES ($1, $2, $3)",
        )
        .bind(article_id)
        .bind(i64::from(assignment.category_id))
        .bind(assignment.is_primary)
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx)?;
    }
    Ok(())
}

async fn insert_images(
    conn: &mut PgConnection,
    article_id: i64,
    images: &[NewArticleImage],
    now: DateTime<Utc>,
) -> DomainResult<()> {
    for image in images {
        sqlx::query(
            "INSERT INTO article_images (article_id, image_url, alt_text, caption, \"order\", created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $6)",
        )
        .bind(article_id)
        .bind(image.image_url.as_str())
        .bind(image.alt_text.as_deref())
        .bind(image.caption.as_deref())
        .bind(image.order)
        .bind(now)
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx)?;
    }
    Ok(())
}

#[async_trait]
impl ArticleWriteRepository for PostgresArticleWriteRepository {
    async fn create_aggregate(
        &self,
        article: NewArticle,
        images: Vec<NewArticleImage>,
        categories: Vec<CategoryAssignment>,
    ) -> DomainResult<ArticleAggregate> {
        let NewArticle {
            title,
            slug,
            content_html,
            province,
            city,
            thumbnail_url,
            active,
            author_id,
            created_at,
            updated_at,
        } = article;

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        ensure_categories_exist(&mut tx, &categories).await?;

        let query = format!(
            "INSERT INTO articles (title, slug, content_html, province, city, thumbnail_url, active, author_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {ARTICLE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ArticleRow>(&query)
            .bind(title.as_str())
            .bind(slug.as_str())
            .bind(content_html.as_str())
            .bind(province.as_deref())
            .bind(city.as_deref())
            .bind(thumbnail_url.as_deref())
            .bind(active)
            .bind(i64::from(author_id))
            .bind(created_at)
            .bind(updated_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        let article_id = row.id;
        insert_category_mappings(&mut tx, article_id, &categories).await?;
        insert_images(&mut tx, article_id, &images, created_at).await?;

        let aggregate = fetch_aggregate(&mut tx, ArticleId::new(article_id)?)
            .await?
            .ok_or_else(|| {
                DomainError::Persistence("created article vanished within transaction".into())
            })?;

        tx.commit().await.map_err(map_sqlx)?;
        Ok(aggregate)
    }

    async fn update_aggregate(
        &self,
        id: ArticleId,
        fields: ArticleFieldUpdate,
        images: Option<Vec<NewArticleImage>>,
        categories: Option<Vec<CategoryAssignment>>,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<ArticleAggregate> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        if let Some(categories) = &categories {
            ensure_categories_exist(&mut tx, categories).await?;
        }

        let ArticleFieldUpdate {
            title,
            slug,
            content_html,
            province,
            city,
            thumbnail_url,
            active,
        } = fields;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE articles SET updated_at = ");
        builder.push_bind(updated_at);

        if let Some(title) = title {
            builder.push(", title = ");
            builder.push_bind(String::from(title));
        }
        if let Some(slug) = slug {
            builder.push(", slug = ");
            builder.push_bind(String::from(slug));
        }
        if let Some(content_html) = content_html {
            builder.push(", content_html = ");
            builder.push_bind(String::from(content_html));
        }
        if let Some(province) = province {
            builder.push(", province = ");
            builder.push_bind(province);
        }
        if let Some(city) = city {
            builder.push(", city = ");
            builder.push_bind(city);
        }
        if let Some(thumbnail_url) = thumbnail_url {
            builder.push(", thumbnail_url = ");
            builder.push_bind(thumbnail_url);
        }
        if let Some(active) = active {
            builder.push(", active = ");
            builder.push_bind(active);
        }

        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(id));
        builder.push(" RETURNING id");

        let touched: Option<(i64,)> = builder
            .build_query_as()
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        if touched.is_none() {
            return Err(DomainError::NotFound("article not found".into()));
        }

        // Replace-all semantics: an empty supplied set still deletes the
        // existing rows.
        if let Some(images) = &images {
            sqlx::query("DELETE FROM article_images WHERE article_id = $1")
                .bind(i64::from(id))
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx)?;
            insert_images(&mut tx, i64::from(id), images, updated_at).await?;
        }

        if let Some(categories) = &categories {
            sqlx::query("DELETE FROM article_category_maps WHERE article_id = $1")
                .bind(i64::from(id))
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx)?;
            insert_category_mappings(&mut tx, i64::from(id), categories).await?;
        }

        let aggregate = fetch_aggregate(&mut tx, id).await?.ok_or_else(|| {
            DomainError::Persistence("updated article vanished within transaction".into())
        })?;

        tx.commit().await.map_err(map_sqlx)?;
        Ok(aggregate)
    }

    async fn set_active(
        &self,
        id: ArticleId,
        active: bool,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<()> {
        let result = sqlx::query("UPDATE articles SET active = $1, updated_at = $2 WHERE id = $3")
            .bind(active)
            .bind(updated_at)
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("article not found".into()));
        }
        Ok(())
    }

    async fn hard_delete(&self, id: ArticleId) -> DomainResult<()> {
        let article_id = i64::from(id);
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        // Dependents first, in dependency order; the schema's ON DELETE
        // CASCADE would also cover this, but the explicit sequence keeps the
        // guarantee storage-agnostic.
        sqlx::query("DELETE FROM article_images WHERE article_id = $1")
            .bind(article_id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        sqlx::query("DELETE FROM article_likes WHERE article_id = $1")
            .bind(article_id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        sqlx::query("DELETE FROM article_saved WHERE article_id = $1")
            .bind(article_id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        sqlx::query(
            "DELETE FROM article_comments WHERE parent_comment_id IN
             (SELECT id FROM article_comments WHERE article_id = $1)",
        )
        .bind(article_id)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx)?;
        sqlx::query("DELETE FROM article_comments WHERE article_id = $1")
            .bind(article_id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        sqlx::query("DELETE FROM article_category_maps WHERE article_id = $1")
            .bind(article_id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(article_id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("article not found".into()));
        }

        tx.commit().await.map_err(map_sqlx)?;
        Ok(())
    }
}

impl PostgresArticleReadRepository {
    fn apply_conditions<'a>(
        builder: &mut QueryBuilder<'a, Postgres>,
        filter: &'a ArticleListFilter,
        cursor: Option<&'a ArticleListCursor>,
    ) {
        let mut has_where = false;
        let mut push_clause = |builder: &mut QueryBuilder<'a, Postgres>| {
            if has_where {
                builder.push(" AND ");
            } else {
                builder.push(" WHERE ");
                has_where = true;
            }
        };

        if !filter.include_inactive {
            push_clause(builder);
            builder.push("active = TRUE");
        }
        if let Some(province) = &filter.province {
            push_clause(builder);
            builder.push("province = ");
            builder.push_bind(province);
        }
        if let Some(city) = &filter.city {
            push_clause(builder);
            builder.push("city = ");
            builder.push_bind(city);
        }
        if let Some(author_id) = filter.author_id {
            push_clause(builder);
            builder.push("author_id = ");
            builder.push_bind(i64::from(author_id));
        }
        if let Some(search) = &filter.search {
            push_clause(builder);
            builder.push("(title ILIKE ");
            builder.push_bind(format!("%{search}%"));
            builder.push(" OR content_html ILIKE ");
            builder.push_bind(format!("%{search}%"));
            builder.push(")");
        }
        if let Some(cursor) = cursor {
            push_clause(builder);
            builder.push("(created_at, id) < (");
            builder.push_bind(cursor.created_at);
            builder.push(", ");
            builder.push_bind(i64::from(cursor.article_id));
            builder.push(")");
        }
    }

    async fn assemble(
        &self,
        conn: &mut PgConnection,
        rows: Vec<ArticleRow>,
    ) -> DomainResult<Vec<ArticleAggregate>> {
        let articles = rows
            .into_iter()
            .map(Article::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let ids: Vec<i64> = articles.iter().map(|a| i64::from(a.id)).collect();

        let mut images = fetch_images(&mut *conn, &ids).await?;
        let mut categories = fetch_category_mappings(&mut *conn, &ids).await?;

        Ok(articles
            .into_iter()
            .map(|article| {
                let key = i64::from(article.id);
                ArticleAggregate {
                    images: images.remove(&key).unwrap_or_default(),
                    categories: categories.remove(&key).unwrap_or_default(),
                    article,
                }
            })
            .collect())
    }
}

#[async_trait]
impl ArticleReadRepository for PostgresArticleReadRepository {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<ArticleAggregate>> {
        let mut conn = self.pool.acquire().await.map_err(map_sqlx)?;
        fetch_aggregate(&mut conn, id).await
    }

    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<ArticleAggregate>> {
        let mut conn = self.pool.acquire().await.map_err(map_sqlx)?;
        let query = format!("SELECT {ARTICLE_COLUMNS} FROM articles WHERE slug = $1");
        let row = sqlx::query_as::<_, ArticleRow>(&query)
            .bind(slug.as_str())
            .fetch_optional(&mut *conn)
            .await
            .map_err(map_sqlx)?;

        match row {
            Some(row) => fetch_aggregate(&mut conn, ArticleId::new(row.id)?).await,
            None => Ok(None),
        }
    }

    async fn slug_owner(&self, slug: &ArticleSlug) -> DomainResult<Option<ArticleId>> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM articles WHERE slug = $1")
            .bind(slug.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;
        row.map(|(id,)| ArticleId::new(id)).transpose()
    }

    async fn list_page(
        &self,
        filter: &ArticleListFilter,
        limit: u32,
        cursor: Option<ArticleListCursor>,
    ) -> DomainResult<(Vec<ArticleAggregate>, Option<ArticleListCursor>)> {
        let limit = limit.clamp(1, 100);
        let fetch_limit = (limit as i64) + 1;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {ARTICLE_COLUMNS} FROM articles"));
        Self::apply_conditions(&mut builder, filter, cursor.as_ref());
        builder.push(" ORDER BY created_at DESC, id DESC LIMIT ");
        builder.push_bind(fetch_limit);

        let mut conn = self.pool.acquire().await.map_err(map_sqlx)?;
        let rows = builder
            .build_query_as::<ArticleRow>()
            .fetch_all(&mut *conn)
            .await
            .map_err(map_sqlx)?;

        let mut aggregates = self.assemble(&mut conn, rows).await?;

        let mut next_cursor = None;
        if aggregates.len() > limit as usize {
            aggregates.pop();
            if let Some(last) = aggregates.last() {
                next_cursor = Some(ArticleListCursor::from_parts(
                    last.article.created_at,
                    last.article.id,
                ));
            }
        }

        Ok((aggregates, next_cursor))
    }
}
