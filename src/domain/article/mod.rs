pub mod entity;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use entity::{
    Article, ArticleAggregate, ArticleFieldUpdate, ArticleImage, CategoryAssignment,
    CategoryMapping, NewArticle, NewArticleImage,
};
pub use repository::{ArticleListFilter, ArticleReadRepository, ArticleWriteRepository};
pub use value_objects::{
    ArticleId, ArticleListCursor, ArticleSlug, ArticleTitle, HtmlBody, ImageUrl,
};
