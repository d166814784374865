//! Answer service - Posting and listing answers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    Answer, Author, NewAnswer, NewNotification, NotificationKind, Question, User,
};
use crate::errors::{AppError, AppResult};
use crate::infra::{AnswerRepository, NotificationRepository, QuestionRepository, UserRepository};

/// Parent-question reference embedded in answer listings
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct QuestionRef {
    pub id: Uuid,
    #[schema(example = "How do I share state between axum handlers?")]
    pub title: String,
}

impl From<&Question> for QuestionRef {
    fn from(question: &Question) -> Self {
        Self {
            id: question.id,
            title: question.title.clone(),
        }
    }
}

/// Answer payload populated with its author (and, in standalone listings,
/// its parent question).
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerView {
    pub id: Uuid,
    /// Rich-text block document, echoed back as submitted
    #[schema(value_type = Object)]
    pub content: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Author>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<QuestionRef>,
    pub votes: i32,
    pub voters: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl AnswerView {
    /// Assemble a view from an answer and optional populated references.
    pub fn assemble(answer: Answer, user: Option<Author>, question: Option<QuestionRef>) -> Self {
        Self {
            id: answer.id,
            content: answer.content,
            user,
            question,
            votes: answer.votes,
            voters: answer.voters,
            created_at: answer.created_at,
        }
    }
}

/// Data for posting an answer
#[derive(Debug, Clone)]
pub struct CreateAnswer {
    pub question_id: Uuid,
    pub content: serde_json::Value,
}

/// Answer service trait for dependency injection.
#[async_trait]
pub trait AnswerService: Send + Sync {
    /// Post an answer to a question, notifying the question owner
    async fn create_answer(&self, author_id: Uuid, input: CreateAnswer) -> AppResult<Answer>;

    /// List answers, optionally restricted to one author, populated with
    /// their authors and parent-question titles
    async fn list_answers(&self, user_id: Option<Uuid>) -> AppResult<Vec<AnswerView>>;
}

/// Concrete implementation of AnswerService.
pub struct AnswerManager {
    answers: Arc<dyn AnswerRepository>,
    questions: Arc<dyn QuestionRepository>,
    users: Arc<dyn UserRepository>,
    notifications: Arc<dyn NotificationRepository>,
}

impl AnswerManager {
    pub fn new(
        answers: Arc<dyn AnswerRepository>,
        questions: Arc<dyn QuestionRepository>,
        users: Arc<dyn UserRepository>,
        notifications: Arc<dyn NotificationRepository>,
    ) -> Self {
        Self {
            answers,
            questions,
            users,
            notifications,
        }
    }
}

#[async_trait]
impl AnswerService for AnswerManager {
    async fn create_answer(&self, author_id: Uuid, input: CreateAnswer) -> AppResult<Answer> {
        let question = self
            .questions
            .find_by_id(input.question_id)
            .await?
            .ok_or(AppError::NotFound)?;

        let answer = self
            .answers
            .create(NewAnswer {
                content: input.content,
                user_id: author_id,
                question_id: question.id,
            })
            .await?;

        self.questions.mark_answered(question.id).await?;

        // Notify the question owner, unless they answered their own question
        if question.user_id != author_id {
            self.notifications
                .create(NewNotification {
                    user_id: question.user_id,
                    kind: NotificationKind::NewAnswer,
                    message: format!("New answer on \"{}\"", question.title),
                    question_id: Some(question.id),
                    answer_id: None,
                })
                .await?;
        }

        Ok(answer)
    }

    async fn list_answers(&self, user_id: Option<Uuid>) -> AppResult<Vec<AnswerView>> {
        let answers = self.answers.list(user_id).await?;

        let author_ids: Vec<Uuid> = answers.iter().map(|a| a.user_id).collect();
        let question_ids: Vec<Uuid> = answers.iter().map(|a| a.question_id).collect();

        let authors: HashMap<Uuid, Author> = self
            .users
            .find_by_ids(dedup(author_ids))
            .await?
            .iter()
            .map(|user: &User| (user.id, Author::from(user)))
            .collect();

        let questions: HashMap<Uuid, QuestionRef> = self
            .questions
            .find_by_ids(dedup(question_ids))
            .await?
            .iter()
            .map(|question| (question.id, QuestionRef::from(question)))
            .collect();

        Ok(answers
            .into_iter()
            .map(|answer| {
                let user = authors.get(&answer.user_id).cloned();
                let question = questions.get(&answer.question_id).cloned();
                AnswerView::assemble(answer, user, question)
            })
            .collect())
    }
}

/// Drop duplicate IDs while preserving order.
pub(crate) fn dedup(ids: Vec<Uuid>) -> Vec<Uuid> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}
