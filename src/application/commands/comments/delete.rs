use super::service::CommentCommandService;
use crate::{
    application::error::ApplicationResult,
    domain::{comment::CommentId, user::UserId},
};

pub struct DeleteCommentCommand {
    pub comment_id: i64,
    pub user_id: i64,
}

impl CommentCommandService {
    /// Soft-deletes the comment. A root comment takes its direct replies
    /// down with it in the same transaction; deleting a reply leaves its
    /// siblings and parent untouched.
    pub async fn delete_comment(&self, command: DeleteCommentCommand) -> ApplicationResult<()> {
        let comment_id = CommentId::new(command.comment_id)?;
        let user_id = UserId::new(command.user_id)?;

        let comment = self.load_owned_comment(comment_id, user_id).await?;

        self.comment_repo
            .soft_delete(comment_id, comment.is_root(), self.clock.now())
            .await?;
        Ok(())
    }
}
