//! Notification emitter
//!
//! Turns domain events into notifications for the people they concern.
//! Emission is best-effort: a failure is logged and swallowed, so it can
//! never fail or undo the mutation that produced the event.

use std::sync::Arc;

use forum_core::entities::{LikeTarget, Notification, NotificationKind};
use forum_core::events::DomainEvent;
use forum_core::traits::NotificationRepository;
use forum_core::value_objects::{Snowflake, SnowflakeGenerator};
use tracing::{debug, warn};

/// Who gets told what about an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationPlan {
    pub recipient_id: Snowflake,
    pub actor_id: Snowflake,
    pub kind: NotificationKind,
    pub discussion_id: Snowflake,
    pub reply_id: Option<Snowflake>,
}

impl NotificationPlan {
    /// Map an event to a notification. Anything a user does to their own
    /// content maps to `None`.
    pub fn for_event(event: &DomainEvent) -> Option<Self> {
        let plan = match event {
            DomainEvent::ReplyPosted(e) => Self {
                recipient_id: e.discussion_author_id,
                actor_id: e.reply_author_id,
                kind: NotificationKind::NewReply,
                discussion_id: e.discussion_id,
                reply_id: Some(e.reply_id),
            },
            DomainEvent::SolutionMarked(e) => Self {
                recipient_id: e.reply_author_id,
                actor_id: e.discussion_author_id,
                kind: NotificationKind::Solved,
                discussion_id: e.discussion_id,
                reply_id: Some(e.reply_id),
            },
            DomainEvent::LikeAdded(e) => Self {
                recipient_id: e.target_author_id,
                actor_id: e.actor_id,
                kind: NotificationKind::Liked,
                discussion_id: e.discussion_id,
                reply_id: match e.target {
                    LikeTarget::Reply(id) => Some(id),
                    LikeTarget::Discussion(_) => None,
                },
            },
        };

        (plan.recipient_id != plan.actor_id).then_some(plan)
    }
}

/// Persists notifications derived from domain events
#[derive(Clone)]
pub struct NotificationEmitter {
    repo: Arc<dyn NotificationRepository>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl NotificationEmitter {
    pub fn new(repo: Arc<dyn NotificationRepository>, id_generator: Arc<SnowflakeGenerator>) -> Self {
        Self { repo, id_generator }
    }

    /// Store the notification for `event`, if it warrants one.
    ///
    /// Returns the stored notification. Storage failures are logged at warn
    /// level and reported as `None`.
    pub async fn dispatch(&self, event: &DomainEvent) -> Option<Notification> {
        let Some(plan) = NotificationPlan::for_event(event) else {
            debug!(event_type = event.event_type(), "Self-directed event, no notification");
            return None;
        };

        let notification = Notification::new(
            self.id_generator.generate(),
            plan.recipient_id,
            plan.actor_id,
            plan.kind,
            plan.discussion_id,
            plan.reply_id,
        );

        match self.repo.create(&notification).await {
            Ok(()) => {
                debug!(
                    notification_id = %notification.id,
                    recipient_id = %notification.recipient_id,
                    kind = %notification.kind,
                    "Notification stored"
                );
                Some(notification)
            }
            Err(e) => {
                warn!(
                    error = %e,
                    event_type = event.event_type(),
                    discussion_id = %event.discussion_id(),
                    recipient_id = %plan.recipient_id,
                    "Failed to store notification"
                );
                None
            }
        }
    }
}

impl std::fmt::Debug for NotificationEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationEmitter")
            .field("worker_id", &self.id_generator.worker_id())
            .finish_non_exhaustive()
    }
}
