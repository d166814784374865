//! AI suggestion pass-through handlers.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{CurrentUser, ValidatedJson};
use crate::api::AppState;
use crate::domain::{AutoTags, ContentModeration, ContentSummary};
use crate::errors::AppResult;

/// Requested analysis type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    AnswerSuggestions,
    AutoTags,
    Moderation,
    Summary,
}

/// AI suggestion request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SuggestionRequest {
    /// Question text to analyze
    #[validate(length(min = 1, message = "Question is required"))]
    #[schema(example = "How do I share state between axum handlers?")]
    pub question: String,
    /// Analysis type
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
}

/// Result payload, shaped by the requested analysis type
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum SuggestionResult {
    Suggestions(Vec<String>),
    Tags(AutoTags),
    Moderation(ContentModeration),
    Summary(ContentSummary),
}

/// AI suggestion response
#[derive(Debug, Serialize, ToSchema)]
pub struct SuggestionResponse {
    pub result: SuggestionResult,
}

/// Create AI routes
pub fn ai_routes() -> Router<AppState> {
    Router::new().route("/suggestions", post(suggestions))
}

/// Run a single AI analysis operation on a question text
#[utoipa::path(
    post,
    path = "/ai/suggestions",
    tag = "AI",
    security(("bearer_auth" = [])),
    request_body = SuggestionRequest,
    responses(
        (status = 200, description = "Analysis result", body = SuggestionResponse),
        (status = 400, description = "Missing question or invalid type"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn suggestions(
    _current_user: CurrentUser,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SuggestionRequest>,
) -> AppResult<Json<SuggestionResponse>> {
    let result = match payload.kind {
        SuggestionKind::AnswerSuggestions => SuggestionResult::Suggestions(
            state.ai_client.answer_suggestions(&payload.question).await?,
        ),
        SuggestionKind::AutoTags => {
            SuggestionResult::Tags(state.ai_client.auto_tag(&payload.question, "").await?)
        }
        SuggestionKind::Moderation => {
            SuggestionResult::Moderation(state.ai_client.moderate(&payload.question, "").await?)
        }
        SuggestionKind::Summary => {
            SuggestionResult::Summary(state.ai_client.summarize(&payload.question, "").await?)
        }
    };

    Ok(Json(SuggestionResponse { result }))
}
