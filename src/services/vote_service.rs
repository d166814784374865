//! Vote service - One vote per user per question/answer.
//!
//! The at-most-one-vote invariant is enforced by a voter-list membership
//! check followed by a separate write. Two concurrent votes from the same
//! user can both pass the check; that read-modify-write window matches the
//! original implementation and is intentionally left as-is.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Answer, NewNotification, NotificationKind, Question};
use crate::errors::{AppError, AppResult};
use crate::infra::{AnswerRepository, NotificationRepository, QuestionRepository};

/// Vote direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    pub fn delta(&self) -> i32 {
        match self {
            VoteDirection::Up => 1,
            VoteDirection::Down => -1,
        }
    }

    fn notification_kind(&self) -> NotificationKind {
        match self {
            VoteDirection::Up => NotificationKind::Upvote,
            VoteDirection::Down => NotificationKind::Downvote,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            VoteDirection::Up => "upvote",
            VoteDirection::Down => "downvote",
        }
    }
}

/// Target of a vote
#[derive(Debug, Clone, Copy)]
pub enum VoteTarget {
    Question(Uuid),
    Answer(Uuid),
}

/// Updated entity returned after a vote
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum VoteReceipt {
    Question { question: Question },
    Answer { answer: Answer },
}

/// Vote service trait for dependency injection.
#[async_trait]
pub trait VoteService: Send + Sync {
    /// Cast a vote on a question or answer
    async fn cast_vote(
        &self,
        voter_id: Uuid,
        target: VoteTarget,
        direction: VoteDirection,
    ) -> AppResult<VoteReceipt>;
}

/// Concrete implementation of VoteService.
pub struct VoteManager {
    questions: Arc<dyn QuestionRepository>,
    answers: Arc<dyn AnswerRepository>,
    notifications: Arc<dyn NotificationRepository>,
}

impl VoteManager {
    pub fn new(
        questions: Arc<dyn QuestionRepository>,
        answers: Arc<dyn AnswerRepository>,
        notifications: Arc<dyn NotificationRepository>,
    ) -> Self {
        Self {
            questions,
            answers,
            notifications,
        }
    }

    async fn vote_on_question(
        &self,
        voter_id: Uuid,
        id: Uuid,
        direction: VoteDirection,
    ) -> AppResult<VoteReceipt> {
        let question = self
            .questions
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        if question.has_voter(voter_id) {
            return Err(AppError::AlreadyVoted);
        }

        let votes = question.votes + direction.delta();
        let mut voters = question.voters;
        voters.push(voter_id);

        let question = self.questions.record_vote(id, votes, voters).await?;
        Ok(VoteReceipt::Question { question })
    }

    async fn vote_on_answer(
        &self,
        voter_id: Uuid,
        id: Uuid,
        direction: VoteDirection,
    ) -> AppResult<VoteReceipt> {
        let answer = self
            .answers
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        if answer.has_voter(voter_id) {
            return Err(AppError::AlreadyVoted);
        }

        let votes = answer.votes + direction.delta();
        let mut voters = answer.voters;
        voters.push(voter_id);

        let answer = self.answers.record_vote(id, votes, voters).await?;

        // Notify the answer owner, unless they voted on their own answer
        if answer.user_id != voter_id {
            self.notifications
                .create(NewNotification {
                    user_id: answer.user_id,
                    kind: direction.notification_kind(),
                    message: format!("Your answer received a {}", direction.as_str()),
                    question_id: None,
                    answer_id: Some(answer.id),
                })
                .await?;
        }

        Ok(VoteReceipt::Answer { answer })
    }
}

#[async_trait]
impl VoteService for VoteManager {
    async fn cast_vote(
        &self,
        voter_id: Uuid,
        target: VoteTarget,
        direction: VoteDirection,
    ) -> AppResult<VoteReceipt> {
        match target {
            VoteTarget::Question(id) => self.vote_on_question(voter_id, id, direction).await,
            VoteTarget::Answer(id) => self.vote_on_answer(voter_id, id, direction).await,
        }
    }
}
