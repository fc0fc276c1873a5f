// src/application/services.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::{
            articles::ArticleCommandService, categories::CategoryCommandService,
            comments::CommentCommandService, reactions::ReactionCommandService,
        },
        ports::{time::Clock, util::SlugGenerator},
        queries::{
            articles::ArticleQueryService, comments::CommentQueryService,
            reactions::ReactionQueryService,
        },
    },
    domain::{
        article::{ArticleReadRepository, ArticleWriteRepository, services::ArticleSlugService},
        category::CategoryRepository,
        comment::CommentRepository,
        reaction::ReactionRepository,
        user::UserRepository,
    },
};

/// The wired service graph handed to the (external) request-handling layer.
pub struct ApplicationServices {
    pub article_commands: Arc<ArticleCommandService>,
    pub category_commands: Arc<CategoryCommandService>,
    pub comment_commands: Arc<CommentCommandService>,
    pub reaction_commands: Arc<ReactionCommandService>,
    pub article_queries: Arc<ArticleQueryService>,
    pub comment_queries: Arc<CommentQueryService>,
    pub reaction_queries: Arc<ReactionQueryService>,
}

impl ApplicationServices {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        article_write_repo: Arc<dyn ArticleWriteRepository>,
        article_read_repo: Arc<dyn ArticleReadRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        comment_repo: Arc<dyn CommentRepository>,
        reaction_repo: Arc<dyn ReactionRepository>,
        user_repo: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
        slugger: Arc<dyn SlugGenerator>,
    ) -> Self {
        let slug_service = Arc::new(ArticleSlugService::new(
            Arc::clone(&article_read_repo),
            Arc::clone(&slugger),
        ));

        let article_commands = Arc::new(ArticleCommandService::new(
            Arc::clone(&article_write_repo),
            Arc::clone(&article_read_repo),
            Arc::clone(&user_repo),
            Arc::clone(&slug_service),
            Arc::clone(&clock),
        ));

        let category_commands = Arc::new(CategoryCommandService::new(
            Arc::clone(&category_repo),
            Arc::clone(&slugger),
            Arc::clone(&clock),
        ));

        let comment_commands = Arc::new(CommentCommandService::new(
            Arc::clone(&comment_repo),
            Arc::clone(&article_read_repo),
            Arc::clone(&user_repo),
            Arc::clone(&clock),
        ));

        let reaction_commands = Arc::new(ReactionCommandService::new(
            Arc::clone(&reaction_repo),
            Arc::clone(&article_read_repo),
            Arc::clone(&user_repo),
        ));

        let article_queries = Arc::new(ArticleQueryService::new(Arc::clone(&article_read_repo)));
        let comment_queries = Arc::new(CommentQueryService::new(
            Arc::clone(&comment_repo),
            Arc::clone(&article_read_repo),
        ));
        let reaction_queries = Arc::new(ReactionQueryService::new(
            Arc::clone(&reaction_repo),
            Arc::clone(&article_read_repo),
        ));

        Self {
            article_commands,
            category_commands,
            comment_commands,
            reaction_commands,
            article_queries,
            comment_queries,
            reaction_queries,
        }
    }
}
