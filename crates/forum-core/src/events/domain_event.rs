//! Domain events - raised after a forum mutation has been persisted
//!
//! Events drive the notification trail. They describe facts that already
//! happened, so consumers must never be able to undo the mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::LikeTarget;
use crate::value_objects::Snowflake;

/// All possible domain events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEvent {
    ReplyPosted(ReplyPostedEvent),
    SolutionMarked(SolutionMarkedEvent),
    LikeAdded(LikeAddedEvent),
}

impl DomainEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ReplyPosted(_) => "REPLY_POSTED",
            Self::SolutionMarked(_) => "SOLUTION_MARKED",
            Self::LikeAdded(_) => "LIKE_ADDED",
        }
    }

    /// Discussion the event belongs to
    pub fn discussion_id(&self) -> Snowflake {
        match self {
            Self::ReplyPosted(e) => e.discussion_id,
            Self::SolutionMarked(e) => e.discussion_id,
            Self::LikeAdded(e) => e.discussion_id,
        }
    }
}

// ============================================================================
// Event Structs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyPostedEvent {
    pub discussion_id: Snowflake,
    pub reply_id: Snowflake,
    pub parent_id: Option<Snowflake>,
    pub reply_author_id: Snowflake,
    pub discussion_author_id: Snowflake,
    pub replies_count: i64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionMarkedEvent {
    pub discussion_id: Snowflake,
    pub reply_id: Snowflake,
    pub discussion_author_id: Snowflake,
    pub reply_author_id: Snowflake,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeAddedEvent {
    pub target: LikeTarget,
    pub discussion_id: Snowflake,
    pub actor_id: Snowflake,
    pub target_author_id: Snowflake,
    pub likes_count: i64,
    pub timestamp: DateTime<Utc>,
}
