//! Database models - SQLx-compatible structs for PostgreSQL tables

mod discussion;
mod notification;
mod reply;

pub use discussion::DiscussionModel;
pub use notification::NotificationModel;
pub use reply::ReplyModel;
