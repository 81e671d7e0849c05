//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;
pub mod views;

// Re-export commonly used request types
pub use requests::{
    CreateDiscussionRequest, ListDiscussionsQuery, ListNotificationsQuery, MarkSolutionQuery,
    PinDiscussionRequest, PostReplyRequest, DEFAULT_LIMIT,
};

// Re-export commonly used response types
pub use responses::{
    DiscussionResponse, HealthChecks, HealthResponse, LikeResponse, MarkAllReadResponse,
    NotificationListResponse, NotificationResponse, PageResponse, ReadinessResponse,
    ReplyResponse, SolutionResponse,
};

pub use views::posted_ago;
