//! Service Container - Centralized service construction and access.

use std::sync::Arc;

use super::{
    AnswerManager, AnswerService, Authenticator, AuthService, ModerationManager,
    ModerationService, NotificationManager, NotificationService, QuestionManager, QuestionService,
    VoteManager, VoteService,
};
use crate::config::Config;
use crate::infra::{
    AiClient, AnswerStore, GeminiClient, NotificationStore, QuestionStore, UserStore,
};

/// Concrete service container wiring repositories, the AI client, and
/// services together.
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    question_service: Arc<dyn QuestionService>,
    answer_service: Arc<dyn AnswerService>,
    vote_service: Arc<dyn VoteService>,
    notification_service: Arc<dyn NotificationService>,
    moderation_service: Arc<dyn ModerationService>,
    ai_client: Arc<dyn AiClient>,
}

impl Services {
    /// Create service container from a database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let users = Arc::new(UserStore::new(db.clone()));
        let questions = Arc::new(QuestionStore::new(db.clone()));
        let answers = Arc::new(AnswerStore::new(db.clone()));
        let notifications = Arc::new(NotificationStore::new(db));
        let ai_client: Arc<dyn AiClient> = Arc::new(GeminiClient::from_config(&config));

        let auth_service = Arc::new(Authenticator::new(users.clone(), config));
        let question_service = Arc::new(QuestionManager::new(
            questions.clone(),
            answers.clone(),
            users.clone(),
            ai_client.clone(),
        ));
        let answer_service = Arc::new(AnswerManager::new(
            answers.clone(),
            questions.clone(),
            users,
            notifications.clone(),
        ));
        let vote_service = Arc::new(VoteManager::new(
            questions.clone(),
            answers,
            notifications.clone(),
        ));
        let notification_service = Arc::new(NotificationManager::new(notifications));
        let moderation_service = Arc::new(ModerationManager::new(questions));

        Self {
            auth_service,
            question_service,
            answer_service,
            vote_service,
            notification_service,
            moderation_service,
            ai_client,
        }
    }

    pub fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    pub fn questions(&self) -> Arc<dyn QuestionService> {
        self.question_service.clone()
    }

    pub fn answers(&self) -> Arc<dyn AnswerService> {
        self.answer_service.clone()
    }

    pub fn votes(&self) -> Arc<dyn VoteService> {
        self.vote_service.clone()
    }

    pub fn notifications(&self) -> Arc<dyn NotificationService> {
        self.notification_service.clone()
    }

    pub fn moderation(&self) -> Arc<dyn ModerationService> {
        self.moderation_service.clone()
    }

    pub fn ai(&self) -> Arc<dyn AiClient> {
        self.ai_client.clone()
    }
}
