//! Notification entity - a read/unread trail entry produced by forum activity

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Someone replied to a discussion you started
    NewReply,
    /// Your reply was accepted as the solution
    Solved,
    /// Someone liked your discussion or reply
    Liked,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewReply => "new_reply",
            Self::Solved => "solved",
            Self::Liked => "liked",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NotificationKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new_reply" => Ok(Self::NewReply),
            "solved" => Ok(Self::Solved),
            "liked" => Ok(Self::Liked),
            other => Err(DomainError::InternalError(format!(
                "unknown notification kind: {other}"
            ))),
        }
    }
}

/// Notification entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Snowflake,
    pub recipient_id: Snowflake,
    /// Who caused the notification
    pub actor_id: Snowflake,
    pub kind: NotificationKind,
    pub discussion_id: Snowflake,
    pub reply_id: Option<Snowflake>,
    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        id: Snowflake,
        recipient_id: Snowflake,
        actor_id: Snowflake,
        kind: NotificationKind,
        discussion_id: Snowflake,
        reply_id: Option<Snowflake>,
    ) -> Self {
        Self {
            id,
            recipient_id,
            actor_id,
            kind,
            discussion_id,
            reply_id,
            is_read: false,
            read_at: None,
            created_at: Utc::now(),
        }
    }

    /// Mark as read. Returns false if it was already read.
    pub fn mark_read(&mut self) -> bool {
        if self.is_read {
            return false;
        }
        self.is_read = true;
        self.read_at = Some(Utc::now());
        true
    }
}
