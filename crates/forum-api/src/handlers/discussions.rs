//! Discussion handlers
//!
//! Endpoints for listing, opening, reading, pinning and liking discussions.

use axum::{extract::State, Json};
use forum_service::dto::{
    CreateDiscussionRequest, DiscussionResponse, LikeResponse, ListDiscussionsQuery, PageResponse,
    PinDiscussionRequest,
};
use forum_service::DiscussionService;

use crate::extractors::{OptionalAuthUser, SnowflakePath, ValidatedJson, ValidatedQuery};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// List discussions
///
/// GET /discussions
pub async fn list_discussions(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    ValidatedQuery(query): ValidatedQuery<ListDiscussionsQuery>,
) -> ApiResult<Json<PageResponse<DiscussionResponse>>> {
    let service = DiscussionService::new(state.service_context());
    let page = service.list_discussions(auth.actor(), &query).await?;
    Ok(Json(page))
}

/// Open a discussion
///
/// POST /discussions
pub async fn create_discussion(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    ValidatedJson(request): ValidatedJson<CreateDiscussionRequest>,
) -> ApiResult<Created<Json<DiscussionResponse>>> {
    let service = DiscussionService::new(state.service_context());
    let response = service.create_discussion(auth.actor(), request).await?;
    Ok(Created(Json(response)))
}

/// Discussion detail; every call counts a view
///
/// GET /discussions/{discussion_id}
pub async fn get_discussion(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    SnowflakePath(discussion_id): SnowflakePath,
) -> ApiResult<Json<DiscussionResponse>> {
    let service = DiscussionService::new(state.service_context());
    let response = service.get_discussion(auth.actor(), discussion_id).await?;
    Ok(Json(response))
}

/// Pin or unpin a discussion
///
/// PUT /discussions/{discussion_id}/pin
pub async fn pin_discussion(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    SnowflakePath(discussion_id): SnowflakePath,
    ValidatedJson(request): ValidatedJson<PinDiscussionRequest>,
) -> ApiResult<Json<DiscussionResponse>> {
    let service = DiscussionService::new(state.service_context());
    let response = service
        .set_pinned(auth.actor(), discussion_id, request.pinned)
        .await?;
    Ok(Json(response))
}

/// Toggle the actor's like on a discussion
///
/// POST /discussions/{discussion_id}/like
pub async fn toggle_discussion_like(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    SnowflakePath(discussion_id): SnowflakePath,
) -> ApiResult<Json<LikeResponse>> {
    let service = DiscussionService::new(state.service_context());
    let response = service.toggle_like(auth.actor(), discussion_id).await?;
    Ok(Json(response))
}
