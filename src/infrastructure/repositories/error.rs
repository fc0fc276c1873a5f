use crate::domain::errors::DomainError;

const CNT_ARTICLE_SLUG: &str = "articles_slug_key";
const CNT_ARTICLE_AUTHOR: &str = "articles_author_id_fkey";
const CNT_CATEGORY_NAME: &str = "categories_name_key";
const CNT_CATEGORY_SLUG: &str = "categories_slug_key";
const CNT_CATEGORY_MAP_PAIR: &str = "article_category_maps_article_id_category_id_key";
const CNT_CATEGORY_MAP_CATEGORY: &str = "article_category_maps_category_id_fkey";
const CNT_LIKE_PAIR: &str = "article_likes_user_id_article_id_key";
const CNT_SAVE_PAIR: &str = "article_saved_user_id_article_id_key";
const CNT_COMMENT_PARENT: &str = "article_comments_parent_comment_id_fkey";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_ARTICLE_SLUG => DomainError::Conflict("slug already exists".into()),
                    CNT_CATEGORY_NAME => {
                        DomainError::Conflict("category name already exists".into())
                    }
                    CNT_CATEGORY_SLUG => {
                        DomainError::Conflict("category slug already exists".into())
                    }
                    CNT_CATEGORY_MAP_PAIR => {
                        DomainError::Conflict("article already mapped to category".into())
                    }
                    CNT_LIKE_PAIR => DomainError::Conflict("article already liked".into()),
                    CNT_SAVE_PAIR => DomainError::Conflict("article already saved".into()),
                    CNT_ARTICLE_AUTHOR => DomainError::NotFound("author not found".into()),
                    CNT_CATEGORY_MAP_CATEGORY => {
                        DomainError::NotFound("category not found".into())
                    }
                    CNT_COMMENT_PARENT => {
                        DomainError::NotFound("parent comment not found".into())
                    }
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}
