//! Vote handlers.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::{CurrentUser, ValidatedJson};
use crate::api::AppState;
use crate::errors::{AppError, AppResult};
use crate::services::{VoteDirection, VoteReceipt, VoteTarget};

/// Vote request: exactly one of `answerId` / `questionId` identifies the
/// target; `type` defaults to an upvote.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    /// Answer to vote on (takes precedence)
    pub answer_id: Option<Uuid>,
    /// Question to vote on
    pub question_id: Option<Uuid>,
    /// Vote direction: "up" or "down"
    #[serde(rename = "type")]
    pub direction: Option<VoteDirection>,
}

/// Create vote routes
pub fn vote_routes() -> Router<AppState> {
    Router::new().route("/", post(cast_vote))
}

/// Cast a vote on a question or answer
#[utoipa::path(
    post,
    path = "/votes",
    tag = "Votes",
    security(("bearer_auth" = [])),
    request_body = VoteRequest,
    responses(
        (status = 200, description = "Updated question or answer"),
        (status = 400, description = "Missing target or already voted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Target not found")
    )
)]
pub async fn cast_vote(
    current_user: CurrentUser,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<VoteRequest>,
) -> AppResult<Json<VoteReceipt>> {
    let target = if let Some(answer_id) = payload.answer_id {
        VoteTarget::Answer(answer_id)
    } else if let Some(question_id) = payload.question_id {
        VoteTarget::Question(question_id)
    } else {
        return Err(AppError::bad_request("Missing answerId or questionId"));
    };

    let direction = payload.direction.unwrap_or(VoteDirection::Up);

    let receipt = state
        .vote_service
        .cast_vote(current_user.id, target, direction)
        .await?;

    Ok(Json(receipt))
}
