//! Route definitions
//!
//! API routes are mounted under /api/v1. Health routes are kept separate so
//! they can bypass rate limiting.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{discussions, health, notifications, replies};
use crate::state::AppState;

/// Create the API router (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(discussion_routes())
        .merge(reply_routes())
        .merge(notification_routes())
}

/// Discussion routes
fn discussion_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/discussions",
            get(discussions::list_discussions).post(discussions::create_discussion),
        )
        .route("/discussions/:discussion_id", get(discussions::get_discussion))
        .route("/discussions/:discussion_id/pin", put(discussions::pin_discussion))
        .route(
            "/discussions/:discussion_id/like",
            post(discussions::toggle_discussion_like),
        )
        // Reply tree
        .route(
            "/discussions/:discussion_id/replies",
            get(replies::list_replies).post(replies::post_reply),
        )
}

/// Reply routes
fn reply_routes() -> Router<AppState> {
    Router::new()
        .route("/replies/:reply_id/like", post(replies::toggle_reply_like))
        .route("/replies/:reply_id/mark-solution", post(replies::mark_solution))
}

/// Notification routes
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(notifications::list_notifications))
        .route("/notifications/read-all", put(notifications::mark_all_read))
        .route("/notifications/:notification_id/read", put(notifications::mark_read))
}
