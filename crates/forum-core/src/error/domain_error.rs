//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Discussion not found: {0}")]
    DiscussionNotFound(Snowflake),

    #[error("Reply not found: {0}")]
    ReplyNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    #[error("Invalid parent reply: {0}")]
    InvalidParent(String),

    // =========================================================================
    // Authentication / Authorization Errors
    // =========================================================================
    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Discussion {0} already has an accepted solution")]
    AlreadySolved(Snowflake),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Storage gateway unavailable: {0}")]
    GatewayUnavailable(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::DiscussionNotFound(_) => "DISCUSSION_NOT_FOUND",
            Self::ReplyNotFound(_) => "REPLY_NOT_FOUND",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::InvalidParent(_) => "INVALID_PARENT",

            // Auth
            Self::AuthenticationRequired => "AUTHENTICATION_REQUIRED",
            Self::NotAuthorized(_) => "NOT_AUTHORIZED",

            // Conflict
            Self::AlreadySolved(_) => "ALREADY_SOLVED",

            // Infrastructure
            Self::GatewayUnavailable(_) => "NETWORK_ERROR",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::DiscussionNotFound(_) | Self::ReplyNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::ContentTooLong { .. } | Self::InvalidParent(_)
        )
    }

    /// Check if the caller must authenticate first
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::AuthenticationRequired)
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotAuthorized(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::AlreadySolved(_))
    }

    /// Transient gateway failures; the caller may retry the same request
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::GatewayUnavailable(_))
    }
}
