//! Reply handlers
//!
//! Endpoints for the reply tree of a discussion, reply likes and accepting a
//! reply as the solution.

use axum::{extract::State, Json};
use forum_service::dto::{
    LikeResponse, MarkSolutionQuery, PostReplyRequest, ReplyResponse, SolutionResponse,
};
use forum_service::{ReplyService, SolutionService};

use crate::extractors::{OptionalAuthUser, SnowflakePath, ValidatedJson, ValidatedQuery};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Replies of a discussion, oldest first
///
/// GET /discussions/{discussion_id}/replies
pub async fn list_replies(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    SnowflakePath(discussion_id): SnowflakePath,
) -> ApiResult<Json<Vec<ReplyResponse>>> {
    let service = ReplyService::new(state.service_context());
    let replies = service.list_replies(auth.actor(), discussion_id).await?;
    Ok(Json(replies))
}

/// Post a reply
///
/// POST /discussions/{discussion_id}/replies
pub async fn post_reply(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    SnowflakePath(discussion_id): SnowflakePath,
    ValidatedJson(request): ValidatedJson<PostReplyRequest>,
) -> ApiResult<Created<Json<ReplyResponse>>> {
    let service = ReplyService::new(state.service_context());
    let response = service
        .post_reply(auth.actor(), discussion_id, request)
        .await?;
    Ok(Created(Json(response)))
}

/// Toggle the actor's like on a reply
///
/// POST /replies/{reply_id}/like
pub async fn toggle_reply_like(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    SnowflakePath(reply_id): SnowflakePath,
) -> ApiResult<Json<LikeResponse>> {
    let service = ReplyService::new(state.service_context());
    let response = service.toggle_like(auth.actor(), reply_id).await?;
    Ok(Json(response))
}

/// Accept a reply as the solution of its discussion
///
/// POST /replies/{reply_id}/mark-solution?discussion_id={discussion_id}
pub async fn mark_solution(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    SnowflakePath(reply_id): SnowflakePath,
    ValidatedQuery(query): ValidatedQuery<MarkSolutionQuery>,
) -> ApiResult<Json<SolutionResponse>> {
    let service = SolutionService::new(state.service_context());
    let response = service
        .mark_solution(auth.actor(), query.discussion_id, reply_id)
        .await?;
    Ok(Json(response))
}
