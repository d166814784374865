//! Moderation service - Admin question status transitions.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{ModerationAction, Question};
use crate::errors::{AppError, AppResult};
use crate::infra::QuestionRepository;

/// Moderation service trait for dependency injection.
///
/// Authorization (admin role) is enforced at the API layer; this service
/// only performs the status transition.
#[async_trait]
pub trait ModerationService: Send + Sync {
    /// Apply a moderation action to a question, returning the updated question
    async fn moderate_question(
        &self,
        question_id: Uuid,
        action: ModerationAction,
    ) -> AppResult<Question>;
}

/// Concrete implementation of ModerationService.
pub struct ModerationManager {
    questions: Arc<dyn QuestionRepository>,
}

impl ModerationManager {
    pub fn new(questions: Arc<dyn QuestionRepository>) -> Self {
        Self { questions }
    }
}

#[async_trait]
impl ModerationService for ModerationManager {
    async fn moderate_question(
        &self,
        question_id: Uuid,
        action: ModerationAction,
    ) -> AppResult<Question> {
        // Surface a 404 before attempting the transition
        self.questions
            .find_by_id(question_id)
            .await?
            .ok_or(AppError::NotFound)?;

        self.questions
            .set_status(question_id, action.target_status())
            .await
    }
}
