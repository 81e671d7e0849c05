//! Notification service
//!
//! Reading and acknowledging the actor's own notifications.

use tracing::{debug, info, instrument};

use forum_core::traits::NotificationQuery;
use forum_core::value_objects::Actor;
use forum_core::Snowflake;

use crate::dto::{
    ListNotificationsQuery, MarkAllReadResponse, NotificationListResponse, NotificationResponse,
};

use super::context::{require_actor, ServiceContext};
use super::error::ServiceResult;

/// Notification service
pub struct NotificationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationService<'a> {
    /// Create a new NotificationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The actor's notifications, newest first, with the unread count
    #[instrument(skip(self, actor))]
    pub async fn list(
        &self,
        actor: Option<&Actor>,
        query: &ListNotificationsQuery,
    ) -> ServiceResult<NotificationListResponse> {
        let actor = require_actor(actor)?;
        let repo = self.ctx.notification_repo();

        let notifications = repo
            .find_by_recipient(actor.id, NotificationQuery::from(query))
            .await?;
        let unread_count = repo.unread_count(actor.id).await?;

        Ok(NotificationListResponse {
            data: notifications.iter().map(NotificationResponse::from).collect(),
            unread_count,
        })
    }

    /// Mark one notification read.
    ///
    /// Unknown ids, notifications of other users and already-read
    /// notifications are ignored without error.
    #[instrument(skip(self, actor))]
    pub async fn mark_read(
        &self,
        actor: Option<&Actor>,
        notification_id: Snowflake,
    ) -> ServiceResult<()> {
        let actor = require_actor(actor)?;

        let changed = self
            .ctx
            .notification_repo()
            .mark_read(notification_id, actor.id)
            .await?;

        if changed {
            debug!(notification_id = %notification_id, "Notification marked read");
        } else {
            debug!(notification_id = %notification_id, "Mark read was a no-op");
        }

        Ok(())
    }

    /// Mark every unread notification of the actor read
    #[instrument(skip(self, actor))]
    pub async fn mark_all_read(&self, actor: Option<&Actor>) -> ServiceResult<MarkAllReadResponse> {
        let actor = require_actor(actor)?;

        let updated = self.ctx.notification_repo().mark_all_read(actor.id).await?;

        info!(recipient_id = %actor.id, updated, "Notifications marked read");

        Ok(MarkAllReadResponse { updated })
    }
}
