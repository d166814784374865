//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

mod answer_service;
mod auth_service;
pub mod container;
mod moderation_service;
mod notification_service;
mod question_service;
mod vote_service;

pub use container::Services;

pub use answer_service::{AnswerManager, AnswerService, AnswerView, CreateAnswer, QuestionRef};
pub use auth_service::{Authenticator, AuthService, Claims, TokenResponse};
pub use moderation_service::{ModerationManager, ModerationService};
pub use notification_service::{NotificationManager, NotificationService};
pub use question_service::{
    CreateQuestion, CreatedQuestion, QuestionManager, QuestionService, QuestionView,
};
pub use vote_service::{VoteDirection, VoteManager, VoteReceipt, VoteService, VoteTarget};
