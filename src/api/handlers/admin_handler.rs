//! Admin moderation handlers.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::{require_admin, CurrentUser, ValidatedJson};
use crate::api::AppState;
use crate::domain::{ModerationAction, Question, QuestionQuery};
use crate::errors::AppResult;
use crate::services::QuestionView;

/// Moderation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModerateRequest {
    /// Question to moderate
    pub question_id: Uuid,
    /// Action: "approve", "moderate", or "delete"
    pub action: ModerationAction,
}

/// Moderation response
#[derive(Debug, Serialize, ToSchema)]
pub struct ModerateResponse {
    pub success: bool,
    #[schema(example = "Question approved successfully")]
    pub message: String,
    #[schema(value_type = Object)]
    pub question: Question,
}

/// Moderation-queue listing response (every status)
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminQuestionListResponse {
    pub questions: Vec<QuestionView>,
}

/// Create admin routes (handlers enforce the admin role)
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/moderate", post(moderate_question))
        .route("/questions", get(list_all_questions))
}

/// Apply a moderation action to a question (admin only)
#[utoipa::path(
    post,
    path = "/admin/moderate",
    tag = "Admin",
    security(("bearer_auth" = [])),
    request_body = ModerateRequest,
    responses(
        (status = 200, description = "Question status updated", body = ModerateResponse),
        (status = 400, description = "Invalid action"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Question not found")
    )
)]
pub async fn moderate_question(
    current_user: CurrentUser,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ModerateRequest>,
) -> AppResult<Json<ModerateResponse>> {
    require_admin(&current_user)?;

    let question = state
        .moderation_service
        .moderate_question(payload.question_id, payload.action)
        .await?;

    Ok(Json(ModerateResponse {
        success: true,
        message: format!("Question {}d successfully", payload.action.as_str()),
        question,
    }))
}

/// List questions of every status - the moderation queue view (admin only)
#[utoipa::path(
    get,
    path = "/admin/questions",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All questions including moderated and deleted", body = AdminQuestionListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn list_all_questions(
    current_user: CurrentUser,
    State(state): State<AppState>,
) -> AppResult<Json<AdminQuestionListResponse>> {
    require_admin(&current_user)?;

    let questions = state
        .question_service
        .list_questions(QuestionQuery {
            include_hidden: true,
            ..Default::default()
        })
        .await?;

    Ok(Json(AdminQuestionListResponse { questions }))
}
