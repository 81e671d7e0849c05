//! Request DTOs for API endpoints
//!
//! Body DTOs implement `Deserialize` and `Validate`. Text emptiness and content
//! length are enforced by the domain entities so that whitespace-only input is
//! caught the same way everywhere.

use serde::Deserialize;
use validator::Validate;

use forum_core::entities::DiscussionCategory;
use forum_core::traits::{DiscussionCursor, DiscussionQuery, NotificationQuery};
use forum_core::Snowflake;

/// Default page size for listings
pub const DEFAULT_LIMIT: i64 = 50;

// ============================================================================
// Discussion Requests
// ============================================================================

/// Create discussion request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDiscussionRequest {
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: String,

    pub content: String,

    #[serde(default)]
    pub category: DiscussionCategory,

    #[serde(default)]
    #[validate(length(max = 10, message = "At most 10 tags allowed"))]
    pub tags: Vec<String>,
}

/// Moderator pin request
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct PinDiscussionRequest {
    pub pinned: bool,
}

/// Query string for listing discussions
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ListDiscussionsQuery {
    pub category: Option<DiscussionCategory>,

    #[validate(length(max = 32, message = "Tag must be at most 32 characters"))]
    pub tag: Option<String>,

    pub solved: Option<bool>,

    /// Resume after this discussion, as returned in `next_before`
    pub before: Option<Snowflake>,

    /// Whether the `before` discussion was pinned, as returned in `next_before_pinned`
    #[serde(default)]
    pub before_pinned: bool,

    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: Option<i64>,
}

impl ListDiscussionsQuery {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }
}

impl From<&ListDiscussionsQuery> for DiscussionQuery {
    fn from(query: &ListDiscussionsQuery) -> Self {
        Self {
            category: query.category,
            tag: query
                .tag
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_lowercase),
            solved: query.solved,
            before: query.before.map(|id| DiscussionCursor {
                pinned: query.before_pinned,
                id,
            }),
            limit: query.limit(),
        }
    }
}

// ============================================================================
// Reply Requests
// ============================================================================

/// Post reply request: `{content, parent_id?}`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PostReplyRequest {
    pub content: String,

    /// Top-level reply to nest under
    #[serde(default)]
    pub parent_id: Option<Snowflake>,
}

/// Query string of the mark-solution endpoint
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct MarkSolutionQuery {
    pub discussion_id: Snowflake,
}

// ============================================================================
// Notification Requests
// ============================================================================

/// Query string for listing notifications
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ListNotificationsQuery {
    #[serde(default)]
    pub unread_only: bool,

    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: Option<i64>,
}

impl From<&ListNotificationsQuery> for NotificationQuery {
    fn from(query: &ListNotificationsQuery) -> Self {
        Self {
            unread_only: query.unread_only,
            limit: query.limit.unwrap_or(DEFAULT_LIMIT),
        }
    }
}
