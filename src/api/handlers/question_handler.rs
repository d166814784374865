//! Question handlers.

use axum::{
    extract::{Path, Query, State},
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
use crate::domain::{AiAnalysis, QuestionFilter, QuestionQuery};
use crate::errors::{AppError, AppResult};
use crate::services::{CreateQuestion, QuestionView};

/// Query parameters for question listings
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListQuestionsParams {
    /// Restrict to questions by this author
    pub user_id: Option<Uuid>,
    /// Substring match against title or tags
    pub search: Option<String>,
    /// Exact tag match
    pub tag: Option<String>,
    /// Sort/filter mode: newest (default), popular, unanswered
    pub filter: Option<QuestionFilter>,
}

/// Question creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateQuestionRequest {
    /// Question title
    #[validate(length(min = 1, max = 200, message = "Title is required (max 200 characters)"))]
    #[schema(example = "How do I share state between axum handlers?")]
    pub title: String,
    /// Serialized rich-text block document
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    /// User-supplied tags (merged with AI suggestions, capped at 8)
    #[serde(default)]
    #[schema(example = json!(["rust", "axum"]))]
    pub tags: Vec<String>,
}

/// Question listing response
#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionListResponse {
    pub questions: Vec<QuestionView>,
}

/// Single-question response
#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionResponse {
    pub question: QuestionView,
}

/// Question creation response: the stored question plus the AI analysis
/// payload (null when analysis failed)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionResponse {
    pub question: QuestionView,
    pub ai_analysis: Option<AiAnalysis>,
}

/// Create question routes (listing and fetching are public; creation
/// authenticates via the [`CurrentUser`] extractor)
pub fn question_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_questions).post(create_question))
        .route("/:id", get(get_question))
}

/// List questions
#[utoipa::path(
    get,
    path = "/questions",
    tag = "Questions",
    params(ListQuestionsParams),
    responses(
        (status = 200, description = "Questions matching the criteria", body = QuestionListResponse)
    )
)]
pub async fn list_questions(
    State(state): State<AppState>,
    Query(params): Query<ListQuestionsParams>,
) -> AppResult<Json<QuestionListResponse>> {
    let questions = state
        .question_service
        .list_questions(QuestionQuery {
            user_id: params.user_id,
            search: params.search,
            tag: params.tag,
            filter: params.filter.unwrap_or_default(),
            include_hidden: false,
        })
        .await?;

    Ok(Json(QuestionListResponse { questions }))
}

/// Fetch a question by ID
#[utoipa::path(
    get,
    path = "/questions/{id}",
    tag = "Questions",
    params(
        ("id" = Uuid, Path, description = "Question ID")
    ),
    responses(
        (status = 200, description = "The question with author and answers", body = QuestionResponse),
        (status = 400, description = "Invalid question ID format"),
        (status = 404, description = "Question not found")
    )
)]
pub async fn get_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<QuestionResponse>> {
    let id = Uuid::parse_str(&id)
        .map_err(|_| AppError::bad_request("Invalid question ID format"))?;

    let question = state.question_service.get_question(id).await?;

    Ok(Json(QuestionResponse { question }))
}

/// Create a question
#[utoipa::path(
    post,
    path = "/questions",
    tag = "Questions",
    security(("bearer_auth" = [])),
    request_body = CreateQuestionRequest,
    responses(
        (status = 201, description = "Question created", body = CreateQuestionResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_question(
    current_user: CurrentUser,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateQuestionRequest>,
) -> AppResult<(StatusCode, Json<CreateQuestionResponse>)> {
    let created = state
        .question_service
        .create_question(
            current_user.id,
            CreateQuestion {
                title: payload.title,
                description: payload.description,
                tags: payload.tags,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateQuestionResponse {
            question: created.question,
            ai_analysis: created.ai_analysis,
        }),
    ))
}
