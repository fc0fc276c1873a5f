pub mod error;
pub mod postgres_article;
pub mod postgres_category;
pub mod postgres_comment;
pub mod postgres_reaction;
pub mod postgres_user;

pub use postgres_article::{PostgresArticleReadRepository, PostgresArticleWriteRepository};
pub use postgres_category::PostgresCategoryRepository;
pub use postgres_comment::PostgresCommentRepository;
pub use postgres_reaction::PostgresReactionRepository;
pub use postgres_user::PostgresUserRepository;
