//! Notification handlers.

use axum::{extract::State, response::Json, routing::get, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::extractors::CurrentUser;
use crate::api::AppState;
use crate::domain::Notification;
use crate::errors::AppResult;
use crate::types::SuccessResponse;

/// Notification listing response
#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationListResponse {
    #[schema(value_type = Vec<Object>)]
    pub notifications: Vec<Notification>,
}

/// Create notification routes
pub fn notification_routes() -> Router<AppState> {
    Router::new().route("/", get(list_notifications).patch(mark_all_read))
}

/// List the caller's notifications, unread first
#[utoipa::path(
    get,
    path = "/notifications",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's notifications", body = NotificationListResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_notifications(
    current_user: CurrentUser,
    State(state): State<AppState>,
) -> AppResult<Json<NotificationListResponse>> {
    let notifications = state
        .notification_service
        .list_notifications(current_user.id)
        .await?;

    Ok(Json(NotificationListResponse { notifications }))
}

/// Mark all of the caller's notifications as read
#[utoipa::path(
    patch,
    path = "/notifications",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All notifications marked read", body = SuccessResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn mark_all_read(
    current_user: CurrentUser,
    State(state): State<AppState>,
) -> AppResult<Json<SuccessResponse>> {
    state
        .notification_service
        .mark_all_read(current_user.id)
        .await?;

    Ok(Json(SuccessResponse::new()))
}
