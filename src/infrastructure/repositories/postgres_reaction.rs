// src/infrastructure/repositories/postgres_reaction.rs
use super::error::map_sqlx;
use crate::domain::article::ArticleId;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::reaction::{ReactionKind, ReactionRepository, ReactionStatus};
use crate::domain::user::UserId;
use async_trait::async_trait;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PostgresReactionRepository {
    pool: PgPool,
}

impl PostgresReactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn table(kind: ReactionKind) -> &'static str {
        match kind {
            ReactionKind::Like => "article_likes",
            ReactionKind::Save => "article_saved",
        }
    }
}

#[async_trait]
impl ReactionRepository for PostgresReactionRepository {
    async fn toggle(
        &self,
        kind: ReactionKind,
        article_id: ArticleId,
        user_id: UserId,
    ) -> DomainResult<ReactionStatus> {
        let table = Self::table(kind);
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let delete = format!("DELETE FROM {table} WHERE user_id = $1 AND article_id = $2");
        let deleted = sqlx::query(&delete)
            .bind(i64::from(user_id))
            .bind(i64::from(article_id))
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        let reacted = if deleted.rows_affected() > 0 {
            false
        } else {
            // ON CONFLICT keeps a lost duplicate-insert race from aborting
            // the transaction; the pair row is present either way.
            let insert = format!(
                "INSERT INTO {table} (user_id, article_id, created_at)
                 VALUES ($1, $2, NOW())
                 ON CONFLICT (user_id, article_id) DO NOTHING"
            );
            sqlx::query(&insert)
                .bind(i64::from(user_id))
                .bind(i64::from(article_id))
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx)?;
            true
        };

        let count_query = format!("SELECT COUNT(*) FROM {table} WHERE article_id = $1");
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(i64::from(article_id))
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        tx.commit().await.map_err(map_sqlx)?;

        let total = u64::try_from(total)
            .map_err(|_| DomainError::Persistence("negative reaction count".into()))?;
        Ok(ReactionStatus { reacted, total })
    }

    async fn status(
        &self,
        kind: ReactionKind,
        article_id: ArticleId,
        user_id: UserId,
    ) -> DomainResult<ReactionStatus> {
        let table = Self::table(kind);

        let exists_query = format!(
            "SELECT EXISTS(SELECT 1 FROM {table} WHERE user_id = $1 AND article_id = $2)"
        );
        let reacted: bool = sqlx::query_scalar(&exists_query)
            .bind(i64::from(user_id))
            .bind(i64::from(article_id))
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let count_query = format!("SELECT COUNT(*) FROM {table} WHERE article_id = $1");
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(i64::from(article_id))
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let total = u64::try_from(total)
            .map_err(|_| DomainError::Persistence("negative reaction count".into()))?;
        Ok(ReactionStatus { reacted, total })
    }
}
