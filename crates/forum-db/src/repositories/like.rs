//! PostgreSQL implementation of LikeRepository

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use forum_core::entities::{LikeTarget, LikeToggle};
use forum_core::traits::{LikeRepository, RepoResult};
use forum_core::value_objects::Snowflake;

use super::error::map_db_error;

/// PostgreSQL implementation of LikeRepository
#[derive(Clone)]
pub struct PgLikeRepository {
    pool: PgPool,
}

impl PgLikeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lock the target row for the rest of the transaction.
    /// Returns false if the target does not exist.
    async fn lock_target(
        tx: &mut Transaction<'_, Postgres>,
        target: LikeTarget,
    ) -> RepoResult<bool> {
        let sql = match target {
            LikeTarget::Discussion(_) => "SELECT id FROM discussions WHERE id = $1 FOR UPDATE",
            LikeTarget::Reply(_) => "SELECT id FROM replies WHERE id = $1 FOR UPDATE",
        };
        let found = sqlx::query_scalar::<_, i64>(sql)
            .bind(target.id().into_inner())
            .fetch_optional(&mut **tx)
            .await
            .map_err(map_db_error)?;
        Ok(found.is_some())
    }

    async fn adjust_count(
        tx: &mut Transaction<'_, Postgres>,
        target: LikeTarget,
        delta: i64,
    ) -> RepoResult<i64> {
        let sql = match target {
            LikeTarget::Discussion(_) => {
                "UPDATE discussions SET likes_count = likes_count + $2 WHERE id = $1 RETURNING likes_count"
            }
            LikeTarget::Reply(_) => {
                "UPDATE replies SET likes_count = likes_count + $2 WHERE id = $1 RETURNING likes_count"
            }
        };
        sqlx::query_scalar::<_, i64>(sql)
            .bind(target.id().into_inner())
            .bind(delta)
            .fetch_one(&mut **tx)
            .await
            .map_err(map_db_error)
    }
}

#[async_trait]
impl LikeRepository for PgLikeRepository {
    #[instrument(skip(self, target), fields(like_target = %target))]
    async fn toggle(&self, actor_id: Snowflake, target: LikeTarget) -> RepoResult<LikeToggle> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        if !Self::lock_target(&mut tx, target).await? {
            return Err(target.not_found());
        }

        let removed = sqlx::query(
            r#"
            DELETE FROM likes WHERE actor_id = $1 AND target_type = $2 AND target_id = $3
            "#,
        )
        .bind(actor_id.into_inner())
        .bind(target.kind())
        .bind(target.id().into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?
        .rows_affected()
            > 0;

        if !removed {
            sqlx::query(
                r#"
                INSERT INTO likes (actor_id, target_type, target_id, created_at)
                VALUES ($1, $2, $3, NOW())
                "#,
            )
            .bind(actor_id.into_inner())
            .bind(target.kind())
            .bind(target.id().into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        let likes_count = Self::adjust_count(&mut tx, target, if removed { -1 } else { 1 }).await?;
        tx.commit().await.map_err(map_db_error)?;

        Ok(LikeToggle {
            target,
            liked: !removed,
            likes_count,
        })
    }

    #[instrument(skip(self, target), fields(like_target = %target))]
    async fn exists(&self, actor_id: Snowflake, target: LikeTarget) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM likes WHERE actor_id = $1 AND target_type = $2 AND target_id = $3
            )
            "#,
        )
        .bind(actor_id.into_inner())
        .bind(target.kind())
        .bind(target.id().into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, discussion_ids), fields(count = discussion_ids.len()))]
    async fn liked_discussions(
        &self,
        actor_id: Snowflake,
        discussion_ids: &[Snowflake],
    ) -> RepoResult<Vec<Snowflake>> {
        let ids: Vec<i64> = discussion_ids.iter().map(|id| id.into_inner()).collect();

        let results = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT target_id
            FROM likes
            WHERE actor_id = $1 AND target_type = 'discussion' AND target_id = ANY($2)
            "#,
        )
        .bind(actor_id.into_inner())
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Snowflake::new).collect())
    }

    #[instrument(skip(self))]
    async fn liked_replies(
        &self,
        actor_id: Snowflake,
        discussion_id: Snowflake,
    ) -> RepoResult<Vec<Snowflake>> {
        let results = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT l.target_id
            FROM likes l
            JOIN replies r ON r.id = l.target_id
            WHERE l.actor_id = $1 AND l.target_type = 'reply' AND r.discussion_id = $2
            "#,
        )
        .bind(actor_id.into_inner())
        .bind(discussion_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Snowflake::new).collect())
    }
}
