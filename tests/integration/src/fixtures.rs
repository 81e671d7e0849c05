//! Test fixtures and data generators
//!
//! Actors, request bodies and the response shapes the tests read back.

use std::sync::atomic::{AtomicU64, Ordering};

use forum_core::{Actor, ActorRole, Snowflake};
use serde::{Deserialize, Serialize};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

// ============================================================================
// Actors
// ============================================================================

pub fn alice() -> Actor {
    Actor::member(Snowflake::new(1001))
}

pub fn bob() -> Actor {
    Actor::member(Snowflake::new(1002))
}

pub fn carol() -> Actor {
    Actor::member(Snowflake::new(1003))
}

pub fn moderator() -> Actor {
    Actor::new(Snowflake::new(1009), ActorRole::Moderator)
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Serialize)]
pub struct CreateDiscussion {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub tags: Vec<String>,
}

impl CreateDiscussion {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            title: format!("How should I grid this layout? #{suffix}"),
            content: "The columns drift apart at narrow widths.".to_string(),
            category: Some("design_help".to_string()),
            tags: vec!["Grid".to_string(), "layout".to_string()],
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PostReply {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Snowflake>,
}

impl PostReply {
    pub fn new(content: &str) -> Self {
        Self {
            content: content.to_string(),
            parent_id: None,
        }
    }

    pub fn under(content: &str, parent_id: Snowflake) -> Self {
        Self {
            content: content.to_string(),
            parent_id: Some(parent_id),
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct DiscussionBody {
    pub id: Snowflake,
    pub title: String,
    pub category: String,
    pub category_label: String,
    pub tags: Vec<String>,
    pub author_id: Snowflake,
    pub is_solved: bool,
    pub is_pinned: bool,
    pub views_count: i64,
    pub replies_count: i64,
    pub likes_count: i64,
    pub is_author: bool,
    pub liked_by_me: bool,
    pub posted_ago: String,
}

#[derive(Debug, Deserialize)]
pub struct DiscussionPage {
    pub data: Vec<DiscussionBody>,
    #[serde(default)]
    pub next_before: Option<Snowflake>,
    #[serde(default)]
    pub next_before_pinned: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ReplyBody {
    pub id: Snowflake,
    pub discussion_id: Snowflake,
    pub parent_id: Option<Snowflake>,
    pub author_id: Snowflake,
    pub content: String,
    pub is_solution: bool,
    pub likes_count: i64,
    pub is_author: bool,
    pub liked_by_me: bool,
}

#[derive(Debug, Deserialize)]
pub struct SolutionBody {
    pub discussion: DiscussionBody,
    pub reply: ReplyBody,
}

#[derive(Debug, Deserialize)]
pub struct LikeBody {
    pub liked: bool,
    pub likes_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct NotificationBody {
    pub id: Snowflake,
    pub kind: String,
    pub actor_id: Snowflake,
    pub discussion_id: Snowflake,
    #[serde(default)]
    pub reply_id: Option<Snowflake>,
    pub is_read: bool,
}

#[derive(Debug, Deserialize)]
pub struct NotificationList {
    pub data: Vec<NotificationBody>,
    pub unread_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct MarkAllRead {
    pub updated: u64,
}

#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub retryable: bool,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}
