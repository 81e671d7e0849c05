//! PostgreSQL implementation of DiscussionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use forum_core::entities::Discussion;
use forum_core::traits::{DiscussionQuery, DiscussionRepository, RepoResult};
use forum_core::value_objects::Snowflake;

use crate::mappers::DiscussionInsert;
use crate::models::DiscussionModel;

use super::error::map_db_error;

/// PostgreSQL implementation of DiscussionRepository
#[derive(Clone)]
pub struct PgDiscussionRepository {
    pool: PgPool,
}

impl PgDiscussionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DiscussionRepository for PgDiscussionRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Discussion>> {
        let result = sqlx::query_as::<_, DiscussionModel>(
            r#"
            SELECT id, title, content, category, tags, author_id, is_solved, is_pinned,
                   views_count, replies_count, likes_count, created_at, updated_at
            FROM discussions
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Discussion::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self, query: DiscussionQuery) -> RepoResult<Vec<Discussion>> {
        let limit = query.limit.clamp(1, 100);
        let tag = query.tag.map(|t| t.trim().to_lowercase());

        let results = sqlx::query_as::<_, DiscussionModel>(
            r#"
            SELECT id, title, content, category, tags, author_id, is_solved, is_pinned,
                   views_count, replies_count, likes_count, created_at, updated_at
            FROM discussions
            WHERE ($1::TEXT IS NULL OR category = $1)
              AND ($2::TEXT IS NULL OR $2 = ANY(tags))
              AND ($3::BOOLEAN IS NULL OR is_solved = $3)
              AND ($4::BIGINT IS NULL OR (is_pinned, id) < ($5::BOOLEAN, $4))
            ORDER BY is_pinned DESC, id DESC
            LIMIT $6
            "#,
        )
        .bind(query.category.map(|c| c.as_str()))
        .bind(tag)
        .bind(query.solved)
        .bind(query.before.map(|c| c.id.into_inner()))
        .bind(query.before.map(|c| c.pinned))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Discussion::try_from).collect()
    }

    #[instrument(skip(self, discussion), fields(discussion_id = %discussion.id))]
    async fn create(&self, discussion: &Discussion) -> RepoResult<()> {
        let insert = DiscussionInsert::new(discussion);

        sqlx::query(
            r#"
            INSERT INTO discussions (id, title, content, category, tags, author_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            "#,
        )
        .bind(insert.id)
        .bind(insert.title)
        .bind(insert.content)
        .bind(insert.category)
        .bind(&insert.tags)
        .bind(insert.author_id)
        .bind(discussion.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn record_view(&self, id: Snowflake) -> RepoResult<Option<Discussion>> {
        // Single statement, so concurrent views never lose an increment
        let result = sqlx::query_as::<_, DiscussionModel>(
            r#"
            UPDATE discussions
            SET views_count = views_count + 1
            WHERE id = $1
            RETURNING id, title, content, category, tags, author_id, is_solved, is_pinned,
                      views_count, replies_count, likes_count, created_at, updated_at
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Discussion::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn set_pinned(&self, id: Snowflake, pinned: bool) -> RepoResult<Option<Discussion>> {
        let result = sqlx::query_as::<_, DiscussionModel>(
            r#"
            UPDATE discussions
            SET is_pinned = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, content, category, tags, author_id, is_solved, is_pinned,
                      views_count, replies_count, likes_count, created_at, updated_at
            "#,
        )
        .bind(id.into_inner())
        .bind(pinned)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Discussion::try_from).transpose()
    }

    async fn ping(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}
