// tests/support/helpers.rs
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use once_cell::sync::Lazy;

use nusacms::application::ports::{time::Clock, util::SlugGenerator};
use nusacms::application::services::ApplicationServices;
use nusacms::domain::article::{ArticleReadRepository, ArticleWriteRepository};
use nusacms::domain::category::CategoryRepository;
use nusacms::domain::comment::CommentRepository;
use nusacms::domain::reaction::ReactionRepository;
use nusacms::domain::user::UserRepository;
use nusacms::infrastructure::util::DefaultSlugGenerator;

use super::mocks::{
    MemoryArticleReadRepo, MemoryArticleWriteRepo, MemoryCategoryRepo, MemoryCommentRepo,
    MemoryReactionRepo, MemoryUserRepo, SharedState, TestClock, shared_state,
};

pub static BASE_TIME: Lazy<chrono::DateTime<Utc>> =
    Lazy::new(|| Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap());

pub const AUTHOR_ID: i64 = 1;
pub const READER_ID: i64 = 2;

pub struct TestHarness {
    pub services: ApplicationServices,
    pub state: SharedState,
    pub clock: Arc<TestClock>,
}

/// Wires the full service graph over the in-memory backend, seeded with an
/// author (id 1) and a reader (id 2).
pub fn harness() -> TestHarness {
    let state = shared_state();
    {
        let mut guard = state.lock().unwrap();
        guard.seed_user(AUTHOR_ID, "author");
        guard.seed_user(READER_ID, "reader");
    }

    let clock = Arc::new(TestClock::new(*BASE_TIME));

    let article_write: Arc<dyn ArticleWriteRepository> =
        Arc::new(MemoryArticleWriteRepo::new(Arc::clone(&state)));
    let article_read: Arc<dyn ArticleReadRepository> =
        Arc::new(MemoryArticleReadRepo::new(Arc::clone(&state)));
    let categories: Arc<dyn CategoryRepository> =
        Arc::new(MemoryCategoryRepo::new(Arc::clone(&state)));
    let comments: Arc<dyn CommentRepository> =
        Arc::new(MemoryCommentRepo::new(Arc::clone(&state)));
    let reactions: Arc<dyn ReactionRepository> =
        Arc::new(MemoryReactionRepo::new(Arc::clone(&state)));
    let users: Arc<dyn UserRepository> = Arc::new(MemoryUserRepo::new(Arc::clone(&state)));

    let clock_port: Arc<dyn Clock> = Arc::clone(&clock) as Arc<dyn Clock>;
    let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator);

    let services = ApplicationServices::new(
        article_write,
        article_read,
        categories,
        comments,
        reactions,
        users,
        clock_port,
        slugger,
    );

    TestHarness {
        services,
        state,
        clock,
    }
}

impl TestHarness {
    pub fn seed_category(&self, name: &str, slug: &str) -> i64 {
        self.state.lock().unwrap().seed_category(name, slug)
    }
}
