pub mod articles;
pub mod categories;
pub mod comments;
pub mod pagination;
pub mod reactions;

pub use articles::{ArticleDto, ArticleImageDto, CategoryMappingDto};
pub use categories::CategoryDto;
pub use comments::{CommentDto, CommentThreadDto};
pub use pagination::CursorPage;
pub use reactions::ReactionStatusDto;
