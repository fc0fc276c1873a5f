// src/application/commands/comments/create.rs
use super::service::CommentCommandService;
use crate::{
    application::{
        dto::CommentDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        article::ArticleId,
        comment::{CommentBody, CommentId, NewComment},
        user::UserId,
    },
};

pub struct CreateCommentCommand {
    pub article_id: i64,
    pub user_id: i64,
    pub content: String,
    pub parent_comment_id: Option<i64>,
}

impl CommentCommandService {
    pub async fn create_comment(
        &self,
        command: CreateCommentCommand,
    ) -> ApplicationResult<CommentDto> {
        let article_id = ArticleId::new(command.article_id)?;
        let user_id = UserId::new(command.user_id)?;
        let body = CommentBody::new(command.content)?;

        self.ensure_article_active(article_id).await?;
        self.ensure_user_exists(user_id).await?;

        let parent_comment_id = match command.parent_comment_id {
            Some(raw) => {
                let parent_id = CommentId::new(raw)?;
                let parent = self
                    .comment_repo
                    .find_by_id(parent_id)
                    .await?
                    .ok_or_else(|| ApplicationError::not_found("parent comment not found"))?;
                parent.ensure_valid_parent(article_id)?;
                Some(parent_id)
            }
            None => None,
        };

        let now = self.clock.now();
        let created = self
            .comment_repo
            .insert(NewComment {
                article_id,
                user_id,
                body,
                parent_comment_id,
                created_at: now,
                updated_at: now,
            })
            .await?;

        Ok(created.into())
    }
}
