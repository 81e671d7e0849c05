//! Repository traits (ports) - the contract a persistence gateway must honor
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Operations that check state and then mutate it
//! (`toggle`, `mark_solution`, reply creation) are single calls here so that
//! implementations can make them atomic; services never read-then-write.

use async_trait::async_trait;

use crate::entities::{Discussion, DiscussionCategory, LikeTarget, LikeToggle, Notification, Reply};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Discussion Repository
// ============================================================================

/// Filters for listing discussions
#[derive(Debug, Clone, Default)]
pub struct DiscussionQuery {
    pub category: Option<DiscussionCategory>,
    pub tag: Option<String>,
    pub solved: Option<bool>,
    /// Only discussions that sort after this position
    pub before: Option<DiscussionCursor>,
    pub limit: i64,
}

/// Position in the listing order: pinned first, then newest first.
///
/// The pinned flag is part of the key, so a page that ends on a pinned
/// discussion still leads on to every unpinned one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscussionCursor {
    pub pinned: bool,
    pub id: Snowflake,
}

impl DiscussionCursor {
    /// Cursor positioned on `discussion`
    pub fn at(discussion: &Discussion) -> Self {
        Self {
            pinned: discussion.is_pinned,
            id: discussion.id,
        }
    }

    /// Whether `discussion` sorts strictly after the cursor
    pub fn admits(&self, discussion: &Discussion) -> bool {
        (discussion.is_pinned, discussion.id) < (self.pinned, self.id)
    }
}

#[async_trait]
pub trait DiscussionRepository: Send + Sync {
    /// Find discussion by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Discussion>>;

    /// List discussions, pinned first, then newest first
    async fn list(&self, query: DiscussionQuery) -> RepoResult<Vec<Discussion>>;

    /// Create a new discussion
    async fn create(&self, discussion: &Discussion) -> RepoResult<()>;

    /// Increment the view counter and return the updated discussion
    async fn record_view(&self, id: Snowflake) -> RepoResult<Option<Discussion>>;

    /// Set the pinned flag and return the updated discussion
    async fn set_pinned(&self, id: Snowflake, pinned: bool) -> RepoResult<Option<Discussion>>;

    /// Check that the backing store is reachable
    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }
}

// ============================================================================
// Reply Repository
// ============================================================================

#[async_trait]
pub trait ReplyRepository: Send + Sync {
    /// Find reply by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Reply>>;

    /// All replies of a discussion, oldest first (ties broken by id)
    async fn find_by_discussion(&self, discussion_id: Snowflake) -> RepoResult<Vec<Reply>>;

    /// Insert the reply and increment the discussion's `replies_count` as one
    /// unit. Returns the new reply count.
    async fn create(&self, reply: &Reply) -> RepoResult<i64>;

    /// Atomically flag `reply_id` as the solution and its discussion as solved.
    ///
    /// Fails with `AlreadySolved` if the discussion is solved when the write is
    /// applied and `ReplyNotFound` if the reply is not part of the discussion.
    /// On failure nothing is modified.
    async fn mark_solution(
        &self,
        discussion_id: Snowflake,
        reply_id: Snowflake,
    ) -> RepoResult<(Discussion, Reply)>;
}

// ============================================================================
// Like Repository
// ============================================================================

#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Atomically add or remove the actor's like and adjust the target's
    /// `likes_count`.
    async fn toggle(&self, actor_id: Snowflake, target: LikeTarget) -> RepoResult<LikeToggle>;

    /// Check whether the actor currently likes the target
    async fn exists(&self, actor_id: Snowflake, target: LikeTarget) -> RepoResult<bool>;

    /// The subset of `discussion_ids` the actor likes, in one lookup
    async fn liked_discussions(
        &self,
        actor_id: Snowflake,
        discussion_ids: &[Snowflake],
    ) -> RepoResult<Vec<Snowflake>>;

    /// IDs of the replies in a discussion that the actor likes
    async fn liked_replies(
        &self,
        actor_id: Snowflake,
        discussion_id: Snowflake,
    ) -> RepoResult<Vec<Snowflake>>;
}

// ============================================================================
// Notification Repository
// ============================================================================

/// Options for listing notifications
#[derive(Debug, Clone, Default)]
pub struct NotificationQuery {
    pub unread_only: bool,
    pub limit: i64,
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Store a new notification
    async fn create(&self, notification: &Notification) -> RepoResult<()>;

    /// Notifications for a recipient, newest first
    async fn find_by_recipient(
        &self,
        recipient_id: Snowflake,
        query: NotificationQuery,
    ) -> RepoResult<Vec<Notification>>;

    /// Number of unread notifications for a recipient
    async fn unread_count(&self, recipient_id: Snowflake) -> RepoResult<i64>;

    /// Mark one of the recipient's notifications read. Returns true only if it
    /// was unread before the call.
    async fn mark_read(&self, id: Snowflake, recipient_id: Snowflake) -> RepoResult<bool>;

    /// Mark every unread notification of the recipient read
    async fn mark_all_read(&self, recipient_id: Snowflake) -> RepoResult<u64>;
}
