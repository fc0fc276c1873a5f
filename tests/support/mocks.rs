// tests/support/mocks.rs
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use nusacms::application::ports::time::Clock;
use nusacms::domain::article::{
    Article, ArticleAggregate, ArticleFieldUpdate, ArticleId, ArticleImage, ArticleListCursor,
    ArticleListFilter, ArticleReadRepository, ArticleSlug, ArticleWriteRepository,
    CategoryAssignment, CategoryMapping, NewArticle, NewArticleImage,
};
use nusacms::domain::category::{
    Category, CategoryId, CategoryName, CategoryRepository, CategorySlug, NewCategory,
};
use nusacms::domain::comment::{Comment, CommentBody, CommentId, CommentRepository, CommentThread, NewComment};
use nusacms::domain::errors::{DomainError, DomainResult};
use nusacms::domain::reaction::{ReactionKind, ReactionRepository, ReactionStatus};
use nusacms::domain::user::{User, UserId, UserRepository};

/* -------------------------------- clock -------------------------------- */

/// Deterministic clock; tests advance it so keyset cursors have distinct
/// timestamps to order by.
pub struct TestClock {
    now: Mutex<DateTime<Utc>>,
}

impl TestClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance_secs(&self, secs: i64) {
        let mut now = self.now.lock().unwrap();
        *now += chrono::Duration::seconds(secs);
    }
}

impl Clock for TestClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/* ----------------------------- shared state ----------------------------- */

#[derive(Debug, Clone)]
struct MappingRow {
    article_id: i64,
    category_id: i64,
    is_primary: bool,
}

/// One lock over every table, mimicking the single database behind the
/// Postgres repositories. Guards are dropped before any await point.
#[derive(Default)]
pub struct MemoryState {
    users: BTreeMap<i64, User>,
    articles: BTreeMap<i64, Article>,
    images: Vec<ArticleImage>,
    mappings: Vec<MappingRow>,
    categories: BTreeMap<i64, Category>,
    comments: BTreeMap<i64, Comment>,
    likes: HashSet<(i64, i64)>,
    saves: HashSet<(i64, i64)>,
    next_article_id: i64,
    next_image_id: i64,
    next_category_id: i64,
    next_comment_id: i64,
}

impl MemoryState {
    pub fn seed_user(&mut self, id: i64, name: &str) {
        let now = Utc::now();
        self.users.insert(
            id,
            User {
                id: UserId::new(id).unwrap(),
                name: name.to_string(),
                email: format!("{name}@example.test"),
                active: true,
                admin: false,
                created_at: now,
                updated_at: now,
            },
        );
    }

    pub fn seed_category(&mut self, name: &str, slug: &str) -> i64 {
        self.next_category_id += 1;
        let id = self.next_category_id;
        let now = Utc::now();
        self.categories.insert(
            id,
            Category {
                id: CategoryId::new(id).unwrap(),
                name: CategoryName::new(name).unwrap(),
                slug: nusacms::domain::category::CategorySlug::new(slug).unwrap(),
                description: None,
                color: None,
                active: true,
                created_at: now,
                updated_at: now,
            },
        );
        id
    }

    pub fn article_count(&self) -> usize {
        self.articles.len()
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn image_count_for(&self, article_id: i64) -> usize {
        self.images
            .iter()
            .filter(|image| i64::from(image.article_id) == article_id)
            .count()
    }

    pub fn mapping_count_for(&self, article_id: i64) -> usize {
        self.mappings
            .iter()
            .filter(|mapping| mapping.article_id == article_id)
            .count()
    }

    pub fn comment_count_for(&self, article_id: i64) -> usize {
        self.comments
            .values()
            .filter(|comment| i64::from(comment.article_id) == article_id)
            .count()
    }

    pub fn like_count_for(&self, article_id: i64) -> usize {
        self.likes.iter().filter(|(_, a)| *a == article_id).count()
    }

    pub fn comment_active(&self, comment_id: i64) -> Option<bool> {
        self.comments.get(&comment_id).map(|comment| comment.active)
    }

    fn slug_taken(&self, slug: &str) -> Option<i64> {
        self.articles
            .values()
            .find(|article| article.slug.as_str() == slug)
            .map(|article| i64::from(article.id))
    }

    fn ensure_categories(&self, assignments: &[CategoryAssignment]) -> DomainResult<()> {
        for assignment in assignments {
            if !self
                .categories
                .contains_key(&i64::from(assignment.category_id))
            {
                return Err(DomainError::NotFound(
                    "one or more categories not found".into(),
                ));
            }
        }
        Ok(())
    }

    fn insert_images(&mut self, article_id: ArticleId, images: Vec<NewArticleImage>, now: DateTime<Utc>) {
        for image in images {
            self.next_image_id += 1;
            self.images.push(ArticleImage {
                id: self.next_image_id,
                article_id,
                image_url: image.image_url,
                alt_text: image.alt_text,
                caption: image.caption,
                order: image.order,
                created_at: now,
                updated_at: now,
            });
        }
    }

    fn insert_mappings(&mut self, article_id: i64, assignments: Vec<CategoryAssignment>) {
        for assignment in assignments {
            self.mappings.push(MappingRow {
                article_id,
                category_id: i64::from(assignment.category_id),
                is_primary: assignment.is_primary,
            });
        }
    }

    fn assemble(&self, article: &Article) -> ArticleAggregate {
        let raw_id = i64::from(article.id);
        let mut images: Vec<ArticleImage> = self
            .images
            .iter()
            .filter(|image| image.article_id == article.id)
            .cloned()
            .collect();
        images.sort_by_key(|image| (image.order, image.id));

        let mut categories: Vec<CategoryMapping> = self
            .mappings
            .iter()
            .filter(|mapping| mapping.article_id == raw_id)
            .map(|mapping| CategoryMapping {
                category: self.categories[&mapping.category_id].clone(),
                is_primary: mapping.is_primary,
            })
            .collect();
        // Primary first, insertion order within each group.
        categories.sort_by_key(|mapping| !mapping.is_primary);

        ArticleAggregate {
            article: article.clone(),
            images,
            categories,
        }
    }
}

pub type SharedState = Arc<Mutex<MemoryState>>;

pub fn shared_state() -> SharedState {
    Arc::new(Mutex::new(MemoryState::default()))
}

/* --------------------------- article write/read --------------------------- */

pub struct MemoryArticleWriteRepo {
    state: SharedState,
}

impl MemoryArticleWriteRepo {
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl ArticleWriteRepository for MemoryArticleWriteRepo {
    async fn create_aggregate(
        &self,
        article: NewArticle,
        images: Vec<NewArticleImage>,
        categories: Vec<CategoryAssignment>,
    ) -> DomainResult<ArticleAggregate> {
        let mut state = self.state.lock().unwrap();
        state.ensure_categories(&categories)?;
        if state.slug_taken(article.slug.as_str()).is_some() {
            return Err(DomainError::Conflict("slug already exists".into()));
        }

        state.next_article_id += 1;
        let id = ArticleId::new(state.next_article_id)?;
        let created_at = article.created_at;
        let row = Article {
            id,
            title: article.title,
            slug: article.slug,
            content_html: article.content_html,
            province: article.province,
            city: article.city,
            thumbnail_url: article.thumbnail_url,
            active: article.active,
            author_id: article.author_id,
            created_at,
            updated_at: article.updated_at,
        };
        state.articles.insert(i64::from(id), row.clone());
        state.insert_mappings(i64::from(id), categories);
        state.insert_images(id, images, created_at);

        Ok(state.assemble(&row))
    }

    async fn update_aggregate(
        &self,
        id: ArticleId,
        fields: ArticleFieldUpdate,
        images: Option<Vec<NewArticleImage>>,
        categories: Option<Vec<CategoryAssignment>>,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<ArticleAggregate> {
        let mut state = self.state.lock().unwrap();
        if let Some(assignments) = &categories {
            state.ensure_categories(assignments)?;
        }
        if let Some(slug) = &fields.slug {
            if let Some(owner) = state.slug_taken(slug.as_str()) {
                if owner != i64::from(id) {
                    return Err(DomainError::Conflict("slug already exists".into()));
                }
            }
        }

        let raw_id = i64::from(id);
        let article = state
            .articles
            .get_mut(&raw_id)
            .ok_or_else(|| DomainError::NotFound("article not found".into()))?;

        if let Some(title) = fields.title {
            article.title = title;
        }
        if let Some(slug) = fields.slug {
            article.slug = slug;
        }
        if let Some(content_html) = fields.content_html {
            article.content_html = content_html;
        }
        if let Some(province) = fields.province {
            article.province = province;
        }
        if let Some(city) = fields.city {
            article.city = city;
        }
        if let Some(thumbnail_url) = fields.thumbnail_url {
            article.thumbnail_url = thumbnail_url;
        }
        if let Some(active) = fields.active {
            article.active = active;
        }
        article.updated_at = updated_at;
        let row = article.clone();

        if let Some(images) = images {
            state.images.retain(|image| image.article_id != id);
            state.insert_images(id, images, updated_at);
        }
        if let Some(assignments) = categories {
            state.mappings.retain(|mapping| mapping.article_id != raw_id);
            state.insert_mappings(raw_id, assignments);
        }

        Ok(state.assemble(&row))
    }

    async fn set_active(
        &self,
        id: ArticleId,
        active: bool,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<()> {
        let mut state = self.state.lock().unwrap();
        let article = state
            .articles
            .get_mut(&i64::from(id))
            .ok_or_else(|| DomainError::NotFound("article not found".into()))?;
        article.active = active;
        article.updated_at = updated_at;
        Ok(())
    }

    async fn hard_delete(&self, id: ArticleId) -> DomainResult<()> {
        let mut state = self.state.lock().unwrap();
        let raw_id = i64::from(id);
        if state.articles.remove(&raw_id).is_none() {
            return Err(DomainError::NotFound("article not found".into()));
        }
        state.images.retain(|image| image.article_id != id);
        state.mappings.retain(|mapping| mapping.article_id != raw_id);
        state.likes.retain(|(_, article)| *article != raw_id);
        state.saves.retain(|(_, article)| *article != raw_id);
        state
            .comments
            .retain(|_, comment| comment.article_id != id);
        Ok(())
    }
}

pub struct MemoryArticleReadRepo {
    state: SharedState,
}

impl MemoryArticleReadRepo {
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl ArticleReadRepository for MemoryArticleReadRepo {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<ArticleAggregate>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .articles
            .get(&i64::from(id))
            .map(|article| state.assemble(article)))
    }

    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<ArticleAggregate>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .articles
            .values()
            .find(|article| article.slug == *slug)
            .map(|article| state.assemble(article)))
    }

    async fn slug_owner(&self, slug: &ArticleSlug) -> DomainResult<Option<ArticleId>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .slug_taken(slug.as_str())
            .map(|raw| ArticleId::new(raw).unwrap()))
    }

    async fn list_page(
        &self,
        filter: &ArticleListFilter,
        limit: u32,
        cursor: Option<ArticleListCursor>,
    ) -> DomainResult<(Vec<ArticleAggregate>, Option<ArticleListCursor>)> {
        let state = self.state.lock().unwrap();
        let limit = limit.clamp(1, 100) as usize;

        let mut rows: Vec<&Article> = state
            .articles
            .values()
            .filter(|article| filter.include_inactive || article.active)
            .filter(|article| {
                filter
                    .province
                    .as_deref()
                    .is_none_or(|p| article.province.as_deref() == Some(p))
            })
            .filter(|article| {
                filter
                    .city
                    .as_deref()
                    .is_none_or(|c| article.city.as_deref() == Some(c))
            })
            .filter(|article| {
                filter
                    .author_id
                    .is_none_or(|author| article.author_id == author)
            })
            .filter(|article| {
                filter.search.as_deref().is_none_or(|needle| {
                    let needle = needle.to_lowercase();
                    article.title.as_str().to_lowercase().contains(&needle)
                        || article
                            .content_html
                            .as_str()
                            .to_lowercase()
                            .contains(&needle)
                })
            })
            .filter(|article| {
                cursor.is_none_or(|cursor| {
                    (article.created_at, i64::from(article.id))
                        < (cursor.created_at, i64::from(cursor.article_id))
                })
            })
            .collect();

        rows.sort_by(|a, b| {
            (b.created_at, i64::from(b.id)).cmp(&(a.created_at, i64::from(a.id)))
        });

        let has_more = rows.len() > limit;
        rows.truncate(limit);
        let next_cursor = if has_more {
            rows.last()
                .map(|article| ArticleListCursor::from_parts(article.created_at, article.id))
        } else {
            None
        };

        let page = rows
            .into_iter()
            .map(|article| state.assemble(article))
            .collect();
        Ok((page, next_cursor))
    }
}

/* ------------------------------- categories ------------------------------- */

pub struct MemoryCategoryRepo {
    state: SharedState,
}

impl MemoryCategoryRepo {
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl CategoryRepository for MemoryCategoryRepo {
    async fn insert(&self, category: NewCategory) -> DomainResult<Category> {
        let mut state = self.state.lock().unwrap();
        if state
            .categories
            .values()
            .any(|existing| existing.name == category.name)
        {
            return Err(DomainError::Conflict(
                "category name already exists".into(),
            ));
        }
        if state
            .categories
            .values()
            .any(|existing| existing.slug == category.slug)
        {
            return Err(DomainError::Conflict(
                "category slug already exists".into(),
            ));
        }

        state.next_category_id += 1;
        let id = state.next_category_id;
        let row = Category {
            id: CategoryId::new(id)?,
            name: category.name,
            slug: category.slug,
            description: category.description,
            color: category.color,
            active: category.active,
            created_at: category.created_at,
            updated_at: category.updated_at,
        };
        state.categories.insert(id, row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: CategoryId) -> DomainResult<Option<Category>> {
        let state = self.state.lock().unwrap();
        Ok(state.categories.get(&i64::from(id)).cloned())
    }

    async fn find_by_name(&self, name: &CategoryName) -> DomainResult<Option<Category>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .categories
            .values()
            .find(|category| category.name == *name)
            .cloned())
    }

    async fn find_by_slug(&self, slug: &CategorySlug) -> DomainResult<Option<Category>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .categories
            .values()
            .find(|category| category.slug == *slug)
            .cloned())
    }
}

/* -------------------------------- comments -------------------------------- */

pub struct MemoryCommentRepo {
    state: SharedState,
}

impl MemoryCommentRepo {
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl CommentRepository for MemoryCommentRepo {
    async fn insert(&self, comment: NewComment) -> DomainResult<Comment> {
        let mut state = self.state.lock().unwrap();
        state.next_comment_id += 1;
        let id = state.next_comment_id;
        let row = Comment {
            id: CommentId::new(id)?,
            article_id: comment.article_id,
            user_id: comment.user_id,
            body: comment.body,
            parent_comment_id: comment.parent_comment_id,
            active: true,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        };
        state.comments.insert(id, row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: CommentId) -> DomainResult<Option<Comment>> {
        let state = self.state.lock().unwrap();
        Ok(state.comments.get(&i64::from(id)).cloned())
    }

    async fn update_body(
        &self,
        id: CommentId,
        body: CommentBody,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<Comment> {
        let mut state = self.state.lock().unwrap();
        let comment = state
            .comments
            .get_mut(&i64::from(id))
            .filter(|comment| comment.active)
            .ok_or_else(|| DomainError::NotFound("comment not found".into()))?;
        comment.body = body;
        comment.updated_at = updated_at;
        Ok(comment.clone())
    }

    async fn soft_delete(
        &self,
        id: CommentId,
        cascade_replies: bool,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<()> {
        let mut state = self.state.lock().unwrap();
        let comment = state
            .comments
            .get_mut(&i64::from(id))
            .filter(|comment| comment.active)
            .ok_or_else(|| DomainError::NotFound("comment not found".into()))?;
        comment.active = false;
        comment.updated_at = updated_at;

        if cascade_replies {
            for reply in state.comments.values_mut() {
                if reply.parent_comment_id == Some(id) && reply.active {
                    reply.active = false;
                    reply.updated_at = updated_at;
                }
            }
        }
        Ok(())
    }

    async fn list_threads(&self, article_id: ArticleId) -> DomainResult<Vec<CommentThread>> {
        let state = self.state.lock().unwrap();
        let mut roots: Vec<&Comment> = state
            .comments
            .values()
            .filter(|comment| {
                comment.article_id == article_id && comment.is_root() && comment.active
            })
            .collect();
        roots.sort_by(|a, b| {
            (b.created_at, i64::from(b.id)).cmp(&(a.created_at, i64::from(a.id)))
        });

        Ok(roots
            .into_iter()
            .map(|root| {
                let mut replies: Vec<Comment> = state
                    .comments
                    .values()
                    .filter(|reply| reply.parent_comment_id == Some(root.id) && reply.active)
                    .cloned()
                    .collect();
                replies.sort_by_key(|reply| (reply.created_at, i64::from(reply.id)));
                CommentThread {
                    root: root.clone(),
                    replies,
                }
            })
            .collect())
    }
}

/* -------------------------------- reactions -------------------------------- */

pub struct MemoryReactionRepo {
    state: SharedState,
}

impl MemoryReactionRepo {
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }

    fn with_table<R>(
        &self,
        kind: ReactionKind,
        f: impl FnOnce(&mut HashSet<(i64, i64)>) -> R,
    ) -> R {
        let mut state = self.state.lock().unwrap();
        match kind {
            ReactionKind::Like => f(&mut state.likes),
            ReactionKind::Save => f(&mut state.saves),
        }
    }
}

#[async_trait]
impl ReactionRepository for MemoryReactionRepo {
    async fn toggle(
        &self,
        kind: ReactionKind,
        article_id: ArticleId,
        user_id: UserId,
    ) -> DomainResult<ReactionStatus> {
        let pair = (i64::from(user_id), i64::from(article_id));
        Ok(self.with_table(kind, |table| {
            let reacted = if table.remove(&pair) {
                false
            } else {
                table.insert(pair);
                true
            };
            let total = table.iter().filter(|(_, a)| *a == pair.1).count() as u64;
            ReactionStatus { reacted, total }
        }))
    }

    async fn status(
        &self,
        kind: ReactionKind,
        article_id: ArticleId,
        user_id: UserId,
    ) -> DomainResult<ReactionStatus> {
        let pair = (i64::from(user_id), i64::from(article_id));
        Ok(self.with_table(kind, |table| ReactionStatus {
            reacted: table.contains(&pair),
            total: table.iter().filter(|(_, a)| *a == pair.1).count() as u64,
        }))
    }
}

/* ---------------------------------- users ---------------------------------- */

pub struct MemoryUserRepo {
    state: SharedState,
}

impl MemoryUserRepo {
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepo {
    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        let state = self.state.lock().unwrap();
        Ok(state.users.get(&i64::from(id)).cloned())
    }
}
