//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod context;
pub mod discussion;
pub mod emitter;
pub mod error;
pub mod notification;
pub mod reply;
pub mod solution;

// Re-export all services for convenience
pub use context::{require_actor, ServiceContext, ServiceContextBuilder};
pub use discussion::DiscussionService;
pub use emitter::{NotificationEmitter, NotificationPlan};
pub use error::{ServiceError, ServiceResult};
pub use notification::NotificationService;
pub use reply::ReplyService;
pub use solution::SolutionService;
