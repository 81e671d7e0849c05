//! PostgreSQL implementation of ReplyRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use forum_core::entities::{Discussion, Reply};
use forum_core::error::DomainError;
use forum_core::traits::{ReplyRepository, RepoResult};
use forum_core::value_objects::Snowflake;

use crate::mappers::ReplyInsert;
use crate::models::{DiscussionModel, ReplyModel};

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of ReplyRepository
#[derive(Clone)]
pub struct PgReplyRepository {
    pool: PgPool,
}

impl PgReplyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReplyRepository for PgReplyRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Reply>> {
        let result = sqlx::query_as::<_, ReplyModel>(
            r#"
            SELECT id, discussion_id, parent_id, author_id, content, is_solution, likes_count, created_at
            FROM replies
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Reply::from))
    }

    #[instrument(skip(self))]
    async fn find_by_discussion(&self, discussion_id: Snowflake) -> RepoResult<Vec<Reply>> {
        let results = sqlx::query_as::<_, ReplyModel>(
            r#"
            SELECT id, discussion_id, parent_id, author_id, content, is_solution, likes_count, created_at
            FROM replies
            WHERE discussion_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(discussion_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Reply::from).collect())
    }

    #[instrument(skip(self, reply), fields(reply_id = %reply.id, discussion_id = %reply.discussion_id))]
    async fn create(&self, reply: &Reply) -> RepoResult<i64> {
        let insert = ReplyInsert::new(reply);
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Bumping the counter first also locks the discussion row until commit
        let replies_count = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE discussions
            SET replies_count = replies_count + 1, updated_at = NOW()
            WHERE id = $1
            RETURNING replies_count
            "#,
        )
        .bind(insert.discussion_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or(DomainError::DiscussionNotFound(reply.discussion_id))?;

        sqlx::query(
            r#"
            INSERT INTO replies (id, discussion_id, parent_id, author_id, content, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(insert.id)
        .bind(insert.discussion_id)
        .bind(insert.parent_id)
        .bind(insert.author_id)
        .bind(insert.content)
        .bind(reply.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(replies_count)
    }

    #[instrument(skip(self))]
    async fn mark_solution(
        &self,
        discussion_id: Snowflake,
        reply_id: Snowflake,
    ) -> RepoResult<(Discussion, Reply)> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Serializes concurrent attempts on the same discussion
        let is_solved = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT is_solved FROM discussions WHERE id = $1 FOR UPDATE
            "#,
        )
        .bind(discussion_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or(DomainError::DiscussionNotFound(discussion_id))?;

        if is_solved {
            debug!("Discussion already solved, rejecting");
            return Err(DomainError::AlreadySolved(discussion_id));
        }

        let reply = sqlx::query_as::<_, ReplyModel>(
            r#"
            UPDATE replies
            SET is_solution = TRUE
            WHERE id = $1 AND discussion_id = $2
            RETURNING id, discussion_id, parent_id, author_id, content, is_solution, likes_count, created_at
            "#,
        )
        .bind(reply_id.into_inner())
        .bind(discussion_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadySolved(discussion_id)))?
        .ok_or(DomainError::ReplyNotFound(reply_id))?;

        let discussion = sqlx::query_as::<_, DiscussionModel>(
            r#"
            UPDATE discussions
            SET is_solved = TRUE, updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, content, category, tags, author_id, is_solved, is_pinned,
                      views_count, replies_count, likes_count, created_at, updated_at
            "#,
        )
        .bind(discussion_id.into_inner())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;
        Ok((Discussion::try_from(discussion)?, Reply::from(reply)))
    }
}
