//! Notification entity <-> model mapper

use forum_core::entities::Notification;
use forum_core::error::DomainError;
use forum_core::value_objects::Snowflake;

use crate::models::NotificationModel;

impl TryFrom<NotificationModel> for Notification {
    type Error = DomainError;

    fn try_from(model: NotificationModel) -> Result<Self, Self::Error> {
        Ok(Notification {
            id: Snowflake::new(model.id),
            recipient_id: Snowflake::new(model.recipient_id),
            actor_id: Snowflake::new(model.actor_id),
            kind: model.kind.parse()?,
            discussion_id: Snowflake::new(model.discussion_id),
            reply_id: model.reply_id.map(Snowflake::new),
            is_read: model.is_read,
            read_at: model.read_at,
            created_at: model.created_at,
        })
    }
}

/// Column values for inserting a notification
pub struct NotificationInsert {
    pub id: i64,
    pub recipient_id: i64,
    pub actor_id: i64,
    pub kind: &'static str,
    pub discussion_id: i64,
    pub reply_id: Option<i64>,
}

impl NotificationInsert {
    pub fn new(notification: &Notification) -> Self {
        Self {
            id: notification.id.into_inner(),
            recipient_id: notification.recipient_id.into_inner(),
            actor_id: notification.actor_id.into_inner(),
            kind: notification.kind.as_str(),
            discussion_id: notification.discussion_id.into_inner(),
            reply_id: notification.reply_id.map(Snowflake::into_inner),
        }
    }
}
