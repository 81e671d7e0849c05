//! # forum-service
//!
//! Application layer containing the discussion, reply, solution and
//! notification use cases, and the DTOs they exchange with the API.
//!
//! Services take the acting user explicitly as `Option<&Actor>`; `None` is an
//! anonymous visitor who may read but not mutate.

pub mod dto;
pub mod services;

pub use services::{
    DiscussionService, NotificationService, ReplyService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, SolutionService,
};
