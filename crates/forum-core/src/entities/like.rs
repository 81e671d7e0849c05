//! Like ledger targets - at most one like per (actor, target)

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// What a like points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum LikeTarget {
    Discussion(Snowflake),
    Reply(Snowflake),
}

impl LikeTarget {
    #[inline]
    pub fn id(&self) -> Snowflake {
        match self {
            Self::Discussion(id) | Self::Reply(id) => *id,
        }
    }

    /// Storage discriminator
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Discussion(_) => "discussion",
            Self::Reply(_) => "reply",
        }
    }

    /// Error to report when the target does not exist
    pub fn not_found(&self) -> DomainError {
        match self {
            Self::Discussion(id) => DomainError::DiscussionNotFound(*id),
            Self::Reply(id) => DomainError::ReplyNotFound(*id),
        }
    }
}

impl fmt::Display for LikeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.id())
    }
}

/// Outcome of an atomic like toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LikeToggle {
    pub target: LikeTarget,
    /// Whether the actor likes the target after the toggle
    pub liked: bool,
    /// Target's like count after the toggle
    pub likes_count: i64,
}
