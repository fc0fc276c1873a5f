use crate::domain::article::ArticleId;
use crate::domain::errors::DomainResult;
use crate::domain::reaction::{ReactionKind, ReactionStatus};
use crate::domain::user::UserId;
use async_trait::async_trait;

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Flip the presence of the (user, article) join row inside one
    /// transaction. A duplicate-insert race resolves to the "already
    /// present" outcome instead of an error.
    async fn toggle(
        &self,
        kind: ReactionKind,
        article_id: ArticleId,
        user_id: UserId,
    ) -> DomainResult<ReactionStatus>;

    async fn status(
        &self,
        kind: ReactionKind,
        article_id: ArticleId,
        user_id: UserId,
    ) -> DomainResult<ReactionStatus>;
}
