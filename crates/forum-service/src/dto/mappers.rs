//! Entity to DTO mappers
//!
//! Plain `From` conversions render an anonymous view. Viewer-dependent fields
//! are filled in by the `for_viewer` constructors.

use chrono::Utc;

use forum_core::entities::{Discussion, LikeToggle, Notification, Reply};
use forum_core::value_objects::Actor;

use super::responses::{
    DiscussionResponse, LikeResponse, NotificationResponse, ReplyResponse,
};
use super::views::posted_ago;

// ============================================================================
// Discussion Mappers
// ============================================================================

impl DiscussionResponse {
    pub fn for_viewer(discussion: &Discussion, viewer: Option<&Actor>, liked_by_me: bool) -> Self {
        Self {
            id: discussion.id,
            title: discussion.title.clone(),
            content: discussion.content.clone(),
            category: discussion.category,
            category_label: discussion.category.label(),
            tags: discussion.tags.clone(),
            author_id: discussion.author_id,
            is_solved: discussion.is_solved,
            is_pinned: discussion.is_pinned,
            views_count: discussion.views_count,
            replies_count: discussion.replies_count,
            likes_count: discussion.likes_count,
            created_at: discussion.created_at,
            updated_at: discussion.updated_at,
            is_author: viewer.is_some_and(|a| discussion.is_author(a.id)),
            liked_by_me: viewer.is_some() && liked_by_me,
            posted_ago: posted_ago(discussion.created_at, Utc::now()),
        }
    }
}

impl From<&Discussion> for DiscussionResponse {
    fn from(discussion: &Discussion) -> Self {
        Self::for_viewer(discussion, None, false)
    }
}

impl From<Discussion> for DiscussionResponse {
    fn from(discussion: Discussion) -> Self {
        Self::from(&discussion)
    }
}

// ============================================================================
// Reply Mappers
// ============================================================================

impl ReplyResponse {
    pub fn for_viewer(reply: &Reply, viewer: Option<&Actor>, liked_by_me: bool) -> Self {
        Self {
            id: reply.id,
            discussion_id: reply.discussion_id,
            parent_id: reply.parent_id,
            author_id: reply.author_id,
            content: reply.content.clone(),
            is_solution: reply.is_solution,
            likes_count: reply.likes_count,
            created_at: reply.created_at,
            is_author: viewer.is_some_and(|a| reply.is_author(a.id)),
            liked_by_me: viewer.is_some() && liked_by_me,
            posted_ago: posted_ago(reply.created_at, Utc::now()),
        }
    }
}

impl From<&Reply> for ReplyResponse {
    fn from(reply: &Reply) -> Self {
        Self::for_viewer(reply, None, false)
    }
}

impl From<Reply> for ReplyResponse {
    fn from(reply: Reply) -> Self {
        Self::from(&reply)
    }
}

// ============================================================================
// Like Mappers
// ============================================================================

impl From<LikeToggle> for LikeResponse {
    fn from(toggle: LikeToggle) -> Self {
        Self {
            target: toggle.target,
            liked: toggle.liked,
            likes_count: toggle.likes_count,
        }
    }
}

// ============================================================================
// Notification Mappers
// ============================================================================

impl From<&Notification> for NotificationResponse {
    fn from(notification: &Notification) -> Self {
        Self {
            id: notification.id,
            kind: notification.kind,
            actor_id: notification.actor_id,
            discussion_id: notification.discussion_id,
            reply_id: notification.reply_id,
            is_read: notification.is_read,
            read_at: notification.read_at,
            created_at: notification.created_at,
            posted_ago: posted_ago(notification.created_at, Utc::now()),
        }
    }
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self::from(&notification)
    }
}
