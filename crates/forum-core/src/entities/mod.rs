//! Domain entities

mod discussion;
mod like;
mod notification;
mod reply;

pub use discussion::{Discussion, DiscussionCategory, SolutionState};
pub use like::{LikeTarget, LikeToggle};
pub use notification::{Notification, NotificationKind};
pub use reply::Reply;

use crate::error::DomainError;

/// Reject empty or whitespace-only text, then enforce a character limit
pub(crate) fn require_text(field: &str, value: &str, max: usize) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::ValidationError(format!("{field} must not be empty")));
    }
    if value.chars().count() > max {
        return Err(DomainError::ContentTooLong { max });
    }
    Ok(())
}
