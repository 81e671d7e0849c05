//! In-memory persistence gateway
//!
//! All forum state lives in one struct behind a single mutex. Every trait method
//! takes the lock once for its whole check-and-set, which gives the same
//! single-winner guarantees the PostgreSQL repositories get from row locks.
//! Nothing awaits while the lock is held.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use tracing::instrument;

use forum_core::entities::{Discussion, LikeTarget, LikeToggle, Notification, Reply};
use forum_core::error::DomainError;
use forum_core::traits::{
    DiscussionQuery, DiscussionRepository, LikeRepository, NotificationQuery,
    NotificationRepository, RepoResult, ReplyRepository,
};
use forum_core::value_objects::Snowflake;

#[derive(Debug, Default)]
struct ForumState {
    discussions: BTreeMap<Snowflake, Discussion>,
    replies: BTreeMap<Snowflake, Reply>,
    likes: HashSet<(Snowflake, LikeTarget)>,
    notifications: BTreeMap<Snowflake, Notification>,
}

impl ForumState {
    fn likes_count_mut(&mut self, target: LikeTarget) -> Option<&mut i64> {
        match target {
            LikeTarget::Discussion(id) => self.discussions.get_mut(&id).map(|d| &mut d.likes_count),
            LikeTarget::Reply(id) => self.replies.get_mut(&id).map(|r| &mut r.likes_count),
        }
    }
}

/// Process-local store implementing every repository trait
///
/// Cloning is cheap and clones share state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<ForumState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================================
// Discussions
// ============================================================================

#[async_trait]
impl DiscussionRepository for InMemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Discussion>> {
        Ok(self.state.lock().discussions.get(&id).cloned())
    }

    async fn list(&self, query: DiscussionQuery) -> RepoResult<Vec<Discussion>> {
        let limit = usize::try_from(query.limit.clamp(1, 100)).unwrap_or(100);
        let state = self.state.lock();

        let mut matching: Vec<Discussion> = state
            .discussions
            .values()
            .filter(|d| query.category.map_or(true, |c| d.category == c))
            .filter(|d| query.tag.as_deref().map_or(true, |t| d.has_tag(t)))
            .filter(|d| query.solved.map_or(true, |s| d.is_solved == s))
            .filter(|d| query.before.map_or(true, |c| c.admits(d)))
            .cloned()
            .collect();

        matching.sort_by(|a, b| b.is_pinned.cmp(&a.is_pinned).then(b.id.cmp(&a.id)));
        matching.truncate(limit);
        Ok(matching)
    }

    #[instrument(skip(self, discussion), fields(discussion_id = %discussion.id))]
    async fn create(&self, discussion: &Discussion) -> RepoResult<()> {
        let mut state = self.state.lock();
        if state.discussions.contains_key(&discussion.id) {
            return Err(DomainError::DatabaseError(format!(
                "duplicate discussion id {}",
                discussion.id
            )));
        }
        state.discussions.insert(discussion.id, discussion.clone());
        Ok(())
    }

    async fn record_view(&self, id: Snowflake) -> RepoResult<Option<Discussion>> {
        let mut state = self.state.lock();
        Ok(state.discussions.get_mut(&id).map(|d| {
            d.views_count += 1;
            d.clone()
        }))
    }

    async fn set_pinned(&self, id: Snowflake, pinned: bool) -> RepoResult<Option<Discussion>> {
        let mut state = self.state.lock();
        Ok(state.discussions.get_mut(&id).map(|d| {
            d.is_pinned = pinned;
            d.updated_at = Utc::now();
            d.clone()
        }))
    }
}

// ============================================================================
// Replies
// ============================================================================

#[async_trait]
impl ReplyRepository for InMemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Reply>> {
        Ok(self.state.lock().replies.get(&id).cloned())
    }

    async fn find_by_discussion(&self, discussion_id: Snowflake) -> RepoResult<Vec<Reply>> {
        let state = self.state.lock();
        let mut replies: Vec<Reply> = state
            .replies
            .values()
            .filter(|r| r.discussion_id == discussion_id)
            .cloned()
            .collect();
        replies.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(replies)
    }

    #[instrument(skip(self, reply), fields(reply_id = %reply.id))]
    async fn create(&self, reply: &Reply) -> RepoResult<i64> {
        let mut state = self.state.lock();
        if state.replies.contains_key(&reply.id) {
            return Err(DomainError::DatabaseError(format!("duplicate reply id {}", reply.id)));
        }
        let discussion = state
            .discussions
            .get_mut(&reply.discussion_id)
            .ok_or(DomainError::DiscussionNotFound(reply.discussion_id))?;
        discussion.replies_count += 1;
        discussion.updated_at = Utc::now();
        let replies_count = discussion.replies_count;

        state.replies.insert(reply.id, reply.clone());
        Ok(replies_count)
    }

    #[instrument(skip(self))]
    async fn mark_solution(
        &self,
        discussion_id: Snowflake,
        reply_id: Snowflake,
    ) -> RepoResult<(Discussion, Reply)> {
        let mut state = self.state.lock();

        let discussion = state
            .discussions
            .get(&discussion_id)
            .ok_or(DomainError::DiscussionNotFound(discussion_id))?;
        if discussion.is_solved {
            return Err(DomainError::AlreadySolved(discussion_id));
        }
        if !state
            .replies
            .get(&reply_id)
            .is_some_and(|r| r.discussion_id == discussion_id)
        {
            return Err(DomainError::ReplyNotFound(reply_id));
        }

        // Both lookups succeeded above, so neither flag is set without the other
        let mut updated_discussion = None;
        if let Some(d) = state.discussions.get_mut(&discussion_id) {
            d.mark_solved()?;
            updated_discussion = Some(d.clone());
        }
        let mut updated_reply = None;
        if let Some(r) = state.replies.get_mut(&reply_id) {
            r.is_solution = true;
            updated_reply = Some(r.clone());
        }

        updated_discussion
            .zip(updated_reply)
            .ok_or_else(|| DomainError::InternalError("solution records vanished".to_string()))
    }
}

// ============================================================================
// Likes
// ============================================================================

#[async_trait]
impl LikeRepository for InMemoryStore {
    #[instrument(skip(self, target), fields(like_target = %target))]
    async fn toggle(&self, actor_id: Snowflake, target: LikeTarget) -> RepoResult<LikeToggle> {
        let mut state = self.state.lock();
        if state.likes_count_mut(target).is_none() {
            return Err(target.not_found());
        }

        let key = (actor_id, target);
        let liked = if state.likes.remove(&key) {
            false
        } else {
            state.likes.insert(key);
            true
        };

        let count = state.likes_count_mut(target).ok_or_else(|| target.not_found())?;
        *count = if liked { *count + 1 } else { (*count - 1).max(0) };

        Ok(LikeToggle {
            target,
            liked,
            likes_count: *count,
        })
    }

    async fn exists(&self, actor_id: Snowflake, target: LikeTarget) -> RepoResult<bool> {
        Ok(self.state.lock().likes.contains(&(actor_id, target)))
    }

    async fn liked_discussions(
        &self,
        actor_id: Snowflake,
        discussion_ids: &[Snowflake],
    ) -> RepoResult<Vec<Snowflake>> {
        let state = self.state.lock();
        Ok(discussion_ids
            .iter()
            .copied()
            .filter(|id| state.likes.contains(&(actor_id, LikeTarget::Discussion(*id))))
            .collect())
    }

    async fn liked_replies(
        &self,
        actor_id: Snowflake,
        discussion_id: Snowflake,
    ) -> RepoResult<Vec<Snowflake>> {
        let state = self.state.lock();
        Ok(state
            .likes
            .iter()
            .filter_map(|(actor, target)| match target {
                LikeTarget::Reply(id) if *actor == actor_id => Some(*id),
                _ => None,
            })
            .filter(|id| {
                state
                    .replies
                    .get(id)
                    .is_some_and(|r| r.discussion_id == discussion_id)
            })
            .collect())
    }
}

// ============================================================================
// Notifications
// ============================================================================

#[async_trait]
impl NotificationRepository for InMemoryStore {
    async fn create(&self, notification: &Notification) -> RepoResult<()> {
        self.state
            .lock()
            .notifications
            .insert(notification.id, notification.clone());
        Ok(())
    }

    async fn find_by_recipient(
        &self,
        recipient_id: Snowflake,
        query: NotificationQuery,
    ) -> RepoResult<Vec<Notification>> {
        let limit = usize::try_from(query.limit.clamp(1, 100)).unwrap_or(100);
        let state = self.state.lock();
        Ok(state
            .notifications
            .values()
            .rev()
            .filter(|n| n.recipient_id == recipient_id)
            .filter(|n| !query.unread_only || !n.is_read)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn unread_count(&self, recipient_id: Snowflake) -> RepoResult<i64> {
        let state = self.state.lock();
        let unread = state
            .notifications
            .values()
            .filter(|n| n.recipient_id == recipient_id && !n.is_read)
            .count();
        Ok(i64::try_from(unread).unwrap_or(i64::MAX))
    }

    async fn mark_read(&self, id: Snowflake, recipient_id: Snowflake) -> RepoResult<bool> {
        let mut state = self.state.lock();
        Ok(state
            .notifications
            .get_mut(&id)
            .filter(|n| n.recipient_id == recipient_id)
            .is_some_and(Notification::mark_read))
    }

    async fn mark_all_read(&self, recipient_id: Snowflake) -> RepoResult<u64> {
        let mut state = self.state.lock();
        let changed = state
            .notifications
            .values_mut()
            .filter(|n| n.recipient_id == recipient_id)
            .map(Notification::mark_read)
            .filter(|changed| *changed)
            .count();
        Ok(changed as u64)
    }
}
