//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use forum_core::entities::{DiscussionCategory, LikeTarget, NotificationKind};
use forum_core::traits::DiscussionCursor;
use forum_core::Snowflake;

// ============================================================================
// Common Response Types
// ============================================================================

/// Cursor page of results
#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub data: Vec<T>,
    /// Pass as `before` to fetch the next page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_before: Option<Snowflake>,
    /// Pass as `before_pinned` along with `before`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_before_pinned: Option<bool>,
}

impl<T> PageResponse<T> {
    pub fn new(data: Vec<T>, next: Option<DiscussionCursor>) -> Self {
        Self {
            data,
            next_before: next.map(|c| c.id),
            next_before_pinned: next.map(|c| c.pinned),
        }
    }
}

// ============================================================================
// Discussion Responses
// ============================================================================

/// Discussion with viewer-dependent fields
#[derive(Debug, Clone, Serialize)]
pub struct DiscussionResponse {
    pub id: Snowflake,
    pub title: String,
    pub content: String,
    pub category: DiscussionCategory,
    pub category_label: &'static str,
    pub tags: BTreeSet<String>,
    pub author_id: Snowflake,
    pub is_solved: bool,
    pub is_pinned: bool,
    pub views_count: i64,
    pub replies_count: i64,
    pub likes_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    // Derived for the current viewer
    pub is_author: bool,
    pub liked_by_me: bool,
    pub posted_ago: String,
}

// ============================================================================
// Reply Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ReplyResponse {
    pub id: Snowflake,
    pub discussion_id: Snowflake,
    pub parent_id: Option<Snowflake>,
    pub author_id: Snowflake,
    pub content: String,
    pub is_solution: bool,
    pub likes_count: i64,
    pub created_at: DateTime<Utc>,

    // Derived for the current viewer
    pub is_author: bool,
    pub liked_by_me: bool,
    pub posted_ago: String,
}

/// Result of marking a solution
#[derive(Debug, Clone, Serialize)]
pub struct SolutionResponse {
    pub discussion: DiscussionResponse,
    pub reply: ReplyResponse,
}

// ============================================================================
// Like Responses
// ============================================================================

/// Like state after a toggle
#[derive(Debug, Clone, Serialize)]
pub struct LikeResponse {
    pub target: LikeTarget,
    pub liked: bool,
    pub likes_count: i64,
}

// ============================================================================
// Notification Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponse {
    pub id: Snowflake,
    pub kind: NotificationKind,
    pub actor_id: Snowflake,
    pub discussion_id: Snowflake,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_id: Option<Snowflake>,
    pub is_read: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub posted_ago: String,
}

#[derive(Debug, Serialize)]
pub struct NotificationListResponse {
    pub data: Vec<NotificationResponse>,
    pub unread_count: i64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct MarkAllReadResponse {
    pub updated: u64,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: &'static str,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION"),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub storage: String,
}

impl ReadinessResponse {
    pub fn ready(storage_healthy: bool) -> Self {
        Self {
            status: if storage_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                storage: if storage_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_response_serialization() {
        let response = LikeResponse {
            target: LikeTarget::Reply(Snowflake::new(77)),
            liked: true,
            likes_count: 3,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["liked"], true);
        assert_eq!(json["likes_count"], 3);
        assert_eq!(json["target"]["type"], "reply");
        assert_eq!(json["target"]["id"], "77");
    }

    #[test]
    fn test_page_response_omits_missing_cursor() {
        let page: PageResponse<u8> = PageResponse::new(Vec::new(), None);
        let json = serde_json::to_value(&page).unwrap();
        assert!(json.get("next_before").is_none());
        assert!(json.get("next_before_pinned").is_none());

        let page: PageResponse<u8> = PageResponse::new(
            vec![1],
            Some(DiscussionCursor {
                pinned: true,
                id: Snowflake::new(42),
            }),
        );
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["next_before"], "42");
        assert_eq!(json["next_before_pinned"], true);
    }

    #[test]
    fn test_readiness_response() {
        let ready = ReadinessResponse::ready(true);
        assert!(ready.is_ready());
        assert_eq!(ready.checks.storage, "healthy");

        let not_ready = ReadinessResponse::ready(false);
        assert!(!not_ready.is_ready());
        assert_eq!(not_ready.checks.storage, "unhealthy");
    }
}
