//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    admin_handler, ai_handler, answer_handler, auth_handler, notification_handler,
    question_handler, vote_handler,
};
use crate::domain::{
    AiAnalysis, Author, AutoTags, ContentModeration, ContentSummary, Difficulty, DuplicateCheck,
    ModerationAction, NotificationKind, QuestionFilter, QuestionStatus, UserResponse, UserRole,
};
use crate::services::{AnswerView, QuestionRef, QuestionView, TokenResponse, VoteDirection};
use crate::types::SuccessResponse;

/// OpenAPI documentation for the StackIt API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "StackIt API",
        version = "0.1.0",
        description = "A minimal Q&A forum API with AI-assisted tagging, moderation, and summaries",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        // Question endpoints
        question_handler::list_questions,
        question_handler::get_question,
        question_handler::create_question,
        // Answer endpoints
        answer_handler::create_answer,
        answer_handler::list_answers,
        // Vote endpoint
        vote_handler::cast_vote,
        // Notification endpoints
        notification_handler::list_notifications,
        notification_handler::mark_all_read,
        // Admin endpoints
        admin_handler::moderate_question,
        admin_handler::list_all_questions,
        // AI endpoints
        ai_handler::suggestions,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            UserResponse,
            Author,
            QuestionStatus,
            QuestionFilter,
            ModerationAction,
            NotificationKind,
            AiAnalysis,
            AutoTags,
            ContentModeration,
            ContentSummary,
            Difficulty,
            DuplicateCheck,
            // View types
            QuestionView,
            AnswerView,
            QuestionRef,
            VoteDirection,
            // Auth types
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            TokenResponse,
            // Handler request/response types
            question_handler::CreateQuestionRequest,
            question_handler::QuestionListResponse,
            question_handler::QuestionResponse,
            question_handler::CreateQuestionResponse,
            answer_handler::CreateAnswerRequest,
            answer_handler::AnswerResponse,
            answer_handler::AnswerListResponse,
            vote_handler::VoteRequest,
            notification_handler::NotificationListResponse,
            admin_handler::ModerateRequest,
            admin_handler::ModerateResponse,
            admin_handler::AdminQuestionListResponse,
            ai_handler::SuggestionKind,
            ai_handler::SuggestionRequest,
            ai_handler::SuggestionResult,
            ai_handler::SuggestionResponse,
            SuccessResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "User registration and login"),
        (name = "Questions", description = "Question listing, fetching, and creation"),
        (name = "Answers", description = "Answer posting and listing"),
        (name = "Votes", description = "Voting on questions and answers"),
        (name = "Notifications", description = "User notifications"),
        (name = "Admin", description = "Admin moderation operations"),
        (name = "AI", description = "AI analysis pass-through")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
