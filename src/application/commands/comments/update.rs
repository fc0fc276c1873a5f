use super::service::CommentCommandService;
use crate::{
    application::{dto::CommentDto, error::ApplicationResult},
    domain::{
        comment::{CommentBody, CommentId},
        user::UserId,
    },
};

pub struct UpdateCommentCommand {
    pub comment_id: i64,
    pub user_id: i64,
    pub content: String,
}

impl CommentCommandService {
    pub async fn update_comment(
        &self,
        command: UpdateCommentCommand,
    ) -> ApplicationResult<CommentDto> {
        let comment_id = CommentId::new(command.comment_id)?;
        let user_id = UserId::new(command.user_id)?;
        let body = CommentBody::new(command.content)?;

        self.load_owned_comment(comment_id, user_id).await?;

        let updated = self
            .comment_repo
            .update_body(comment_id, body, self.clock.now())
            .await?;
        Ok(updated.into())
    }
}
