//! Entity <-> model mappers
//!
//! - `From<Model> for Entity` / `TryFrom` where a text column holds an enum
//! - `*Insert` structs: prepare entity data for database writes

mod discussion;
mod notification;
mod reply;

pub use discussion::DiscussionInsert;
pub use notification::NotificationInsert;
pub use reply::ReplyInsert;
