//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and repositories
//! - The generative-language API client

pub mod ai;
pub mod db;
pub mod repositories;

pub use ai::{AiClient, GeminiClient};
pub use db::{Database, Migrator};
pub use repositories::{
    AnswerRepository, AnswerStore, NotificationRepository, NotificationStore, QuestionRepository,
    QuestionStore, UserRepository, UserStore,
};

#[cfg(any(test, feature = "test-utils"))]
pub use ai::MockAiClient;
#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockAnswerRepository, MockNotificationRepository, MockQuestionRepository, MockUserRepository,
};
