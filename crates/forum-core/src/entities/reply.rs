//! Reply entity - a response within a discussion, threaded at most one level deep

use chrono::{DateTime, Utc};

use super::require_text;
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Reply entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub id: Snowflake,
    pub discussion_id: Snowflake,
    pub parent_id: Option<Snowflake>,
    pub author_id: Snowflake,
    pub content: String,
    pub is_solution: bool,
    pub likes_count: i64,
    pub created_at: DateTime<Utc>,
}

impl Reply {
    pub const MAX_CONTENT_LENGTH: usize = 10_000;

    /// Create a new reply. Parent eligibility is checked separately with
    /// [`Reply::ensure_can_parent`] since it needs the parent record.
    pub fn new(
        id: Snowflake,
        discussion_id: Snowflake,
        author_id: Snowflake,
        content: String,
        parent_id: Option<Snowflake>,
    ) -> Result<Self, DomainError> {
        require_text("content", &content, Self::MAX_CONTENT_LENGTH)?;
        Ok(Self {
            id,
            discussion_id,
            parent_id,
            author_id,
            content,
            is_solution: false,
            likes_count: 0,
            created_at: Utc::now(),
        })
    }

    #[inline]
    pub fn is_nested(&self) -> bool {
        self.parent_id.is_some()
    }

    #[inline]
    pub fn is_author(&self, user_id: Snowflake) -> bool {
        self.author_id == user_id
    }

    /// A reply can be a parent only within its own discussion and only if it is
    /// top-level itself.
    pub fn ensure_can_parent(&self, discussion_id: Snowflake) -> Result<(), DomainError> {
        if self.discussion_id != discussion_id {
            return Err(DomainError::InvalidParent(format!(
                "reply {} belongs to another discussion",
                self.id
            )));
        }
        if self.is_nested() {
            return Err(DomainError::InvalidParent(format!(
                "reply {} is already nested",
                self.id
            )));
        }
        Ok(())
    }
}
