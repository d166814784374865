//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::infra::{AiClient, Database};
use crate::services::{
    AnswerService, AuthService, ModerationService, NotificationService, QuestionService, Services,
    VoteService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// Question service
    pub question_service: Arc<dyn QuestionService>,
    /// Answer service
    pub answer_service: Arc<dyn AnswerService>,
    /// Vote service
    pub vote_service: Arc<dyn VoteService>,
    /// Notification service
    pub notification_service: Arc<dyn NotificationService>,
    /// Admin moderation service
    pub moderation_service: Arc<dyn ModerationService>,
    /// Generative-language API client (AI suggestions pass-through)
    pub ai_client: Arc<dyn AiClient>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from a database connection and config.
    ///
    /// This is the recommended way to create AppState as it uses
    /// the service container for centralized service wiring.
    pub fn from_config(database: Arc<Database>, config: crate::config::Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);

        Self {
            auth_service: container.auth(),
            question_service: container.questions(),
            answer_service: container.answers(),
            vote_service: container.votes(),
            notification_service: container.notifications(),
            moderation_service: container.moderation(),
            ai_client: container.ai(),
            database,
        }
    }

    /// Create application state with manually injected services (tests).
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        question_service: Arc<dyn QuestionService>,
        answer_service: Arc<dyn AnswerService>,
        vote_service: Arc<dyn VoteService>,
        notification_service: Arc<dyn NotificationService>,
        moderation_service: Arc<dyn ModerationService>,
        ai_client: Arc<dyn AiClient>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            auth_service,
            question_service,
            answer_service,
            vote_service,
            notification_service,
            moderation_service,
            ai_client,
            database,
        }
    }
}
