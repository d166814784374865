//! Answer handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::{CurrentUser, ValidatedJson};
use crate::api::AppState;
use crate::domain::Answer;
use crate::errors::AppResult;
use crate::services::{AnswerView, CreateAnswer};

/// Answer creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnswerRequest {
    /// Parent question ID
    pub question_id: Uuid,
    /// Rich-text block document
    #[schema(value_type = Object)]
    pub content: serde_json::Value,
}

/// Query parameters for answer listings
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListAnswersParams {
    /// Restrict to answers by this author
    pub user_id: Option<Uuid>,
}

/// Answer creation response
#[derive(Debug, Serialize, ToSchema)]
pub struct AnswerResponse {
    #[schema(value_type = Object)]
    pub answer: Answer,
}

/// Answer listing response
#[derive(Debug, Serialize, ToSchema)]
pub struct AnswerListResponse {
    pub answers: Vec<AnswerView>,
}

/// Create answer routes (listing is public; creation authenticates via the
/// [`CurrentUser`] extractor)
pub fn answer_routes() -> Router<AppState> {
    Router::new().route("/", get(list_answers).post(create_answer))
}

/// Post an answer to a question
#[utoipa::path(
    post,
    path = "/answers",
    tag = "Answers",
    security(("bearer_auth" = [])),
    request_body = CreateAnswerRequest,
    responses(
        (status = 201, description = "Answer created", body = AnswerResponse),
        (status = 400, description = "Missing fields"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Question not found")
    )
)]
pub async fn create_answer(
    current_user: CurrentUser,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateAnswerRequest>,
) -> AppResult<(StatusCode, Json<AnswerResponse>)> {
    let answer = state
        .answer_service
        .create_answer(
            current_user.id,
            CreateAnswer {
                question_id: payload.question_id,
                content: payload.content,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(AnswerResponse { answer })))
}

/// List answers
#[utoipa::path(
    get,
    path = "/answers",
    tag = "Answers",
    params(ListAnswersParams),
    responses(
        (status = 200, description = "Answers with their authors and parent questions", body = AnswerListResponse)
    )
)]
pub async fn list_answers(
    State(state): State<AppState>,
    Query(params): Query<ListAnswersParams>,
) -> AppResult<Json<AnswerListResponse>> {
    let answers = state.answer_service.list_answers(params.user_id).await?;

    Ok(Json(AnswerListResponse { answers }))
}
