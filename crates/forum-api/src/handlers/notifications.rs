//! Notification handlers

use axum::{extract::State, Json};
use forum_service::dto::{ListNotificationsQuery, MarkAllReadResponse, NotificationListResponse};
use forum_service::NotificationService;

use crate::extractors::{OptionalAuthUser, SnowflakePath, ValidatedQuery};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// The actor's notifications, newest first
///
/// GET /notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    ValidatedQuery(query): ValidatedQuery<ListNotificationsQuery>,
) -> ApiResult<Json<NotificationListResponse>> {
    let service = NotificationService::new(state.service_context());
    let response = service.list(auth.actor(), &query).await?;
    Ok(Json(response))
}

/// Mark one notification read. Answers 204 even when nothing changed.
///
/// PUT /notifications/{notification_id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    SnowflakePath(notification_id): SnowflakePath,
) -> ApiResult<NoContent> {
    let service = NotificationService::new(state.service_context());
    service.mark_read(auth.actor(), notification_id).await?;
    Ok(NoContent)
}

/// Mark all of the actor's notifications read
///
/// PUT /notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
) -> ApiResult<Json<MarkAllReadResponse>> {
    let service = NotificationService::new(state.service_context());
    let response = service.mark_all_read(auth.actor()).await?;
    Ok(Json(response))
}
