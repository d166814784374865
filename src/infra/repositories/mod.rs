//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod answer_repository;
pub(crate) mod entities;
mod notification_repository;
mod question_repository;
mod user_repository;

pub use answer_repository::{AnswerRepository, AnswerStore};
pub use notification_repository::{NotificationRepository, NotificationStore};
pub use question_repository::{QuestionRepository, QuestionStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use answer_repository::MockAnswerRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use notification_repository::MockNotificationRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use question_repository::MockQuestionRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;

/// Serialize a value into a JSON column, falling back to `null`.
pub(crate) fn json_value<T: serde::Serialize>(value: &T) -> sea_orm::prelude::Json {
    serde_json::to_value(value).unwrap_or(serde_json::Value::Null)
}
