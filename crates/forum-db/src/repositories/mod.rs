//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in forum-core.

mod discussion;
mod error;
mod like;
mod notification;
mod reply;

pub use discussion::PgDiscussionRepository;
pub use like::PgLikeRepository;
pub use notification::PgNotificationRepository;
pub use reply::PgReplyRepository;
