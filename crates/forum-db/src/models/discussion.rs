//! Discussion database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for discussions table
#[derive(Debug, Clone, FromRow)]
pub struct DiscussionModel {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub author_id: i64,
    pub is_solved: bool,
    pub is_pinned: bool,
    pub views_count: i64,
    pub replies_count: i64,
    pub likes_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
