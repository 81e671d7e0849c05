//! # forum-core
//!
//! Domain layer for the discussion forum: discussions, threaded replies, the like ledger,
//! the solution protocol and notifications, plus the repository traits a storage gateway
//! must implement. This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Discussion, DiscussionCategory, LikeTarget, LikeToggle, Notification, NotificationKind,
    Reply, SolutionState,
};
pub use error::DomainError;
pub use events::DomainEvent;
pub use traits::{
    DiscussionQuery, DiscussionRepository, LikeRepository, NotificationQuery,
    NotificationRepository, RepoResult, ReplyRepository,
};
pub use value_objects::{Actor, ActorRole, Snowflake, SnowflakeGenerator, SnowflakeParseError};
