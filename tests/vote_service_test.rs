//! Vote service unit tests.
//!
//! Covers the one-vote-per-user membership check, up/down adjustment, and
//! vote notifications.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use stackit::domain::{Answer, NotificationKind, Question, QuestionStatus};
use stackit::errors::AppError;
use stackit::infra::{MockAnswerRepository, MockNotificationRepository, MockQuestionRepository};
use stackit::services::{VoteDirection, VoteManager, VoteReceipt, VoteService, VoteTarget};

fn test_question(id: Uuid, owner: Uuid, votes: i32, voters: Vec<Uuid>) -> Question {
    Question {
        id,
        title: "Votable".to_string(),
        description: r#"{"blocks":[]}"#.to_string(),
        tags: vec!["rust".to_string()],
        user_id: owner,
        votes,
        voters,
        status: QuestionStatus::Active,
        views: 0,
        is_answered: false,
        accepted_answer_id: None,
        ai_analysis: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn test_answer(id: Uuid, owner: Uuid, votes: i32, voters: Vec<Uuid>) -> Answer {
    Answer {
        id,
        content: serde_json::json!({"blocks": []}),
        user_id: owner,
        question_id: Uuid::new_v4(),
        votes,
        voters,
        created_at: Utc::now(),
    }
}

fn manager(
    questions: MockQuestionRepository,
    answers: MockAnswerRepository,
    notifications: MockNotificationRepository,
) -> VoteManager {
    VoteManager::new(Arc::new(questions), Arc::new(answers), Arc::new(notifications))
}

#[tokio::test]
async fn upvote_on_question_increments_and_records_voter() {
    let question_id = Uuid::new_v4();
    let voter = Uuid::new_v4();
    let owner = Uuid::new_v4();

    let mut questions = MockQuestionRepository::new();
    questions
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_question(id, owner, 3, vec![]))));
    questions
        .expect_record_vote()
        .withf(move |_, votes, voters| *votes == 4 && voters.contains(&voter))
        .returning(move |id, votes, voters| Ok(test_question(id, owner, votes, voters)));

    let service = manager(questions, MockAnswerRepository::new(), MockNotificationRepository::new());
    let receipt = service
        .cast_vote(voter, VoteTarget::Question(question_id), VoteDirection::Up)
        .await
        .unwrap();

    match receipt {
        VoteReceipt::Question { question } => assert_eq!(question.votes, 4),
        VoteReceipt::Answer { .. } => panic!("expected a question receipt"),
    }
}

#[tokio::test]
async fn second_vote_by_same_user_is_rejected() {
    let voter = Uuid::new_v4();
    let owner = Uuid::new_v4();

    let mut questions = MockQuestionRepository::new();
    questions
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_question(id, owner, 1, vec![voter]))));

    let service = manager(questions, MockAnswerRepository::new(), MockNotificationRepository::new());
    let result = service
        .cast_vote(voter, VoteTarget::Question(Uuid::new_v4()), VoteDirection::Up)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::AlreadyVoted));
}

#[tokio::test]
async fn downvote_on_answer_decrements_and_notifies_owner() {
    let voter = Uuid::new_v4();
    let owner = Uuid::new_v4();

    let mut answers = MockAnswerRepository::new();
    answers
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_answer(id, owner, 2, vec![]))));
    answers
        .expect_record_vote()
        .withf(move |_, votes, voters| *votes == 1 && voters.contains(&voter))
        .returning(move |id, votes, voters| Ok(test_answer(id, owner, votes, voters)));

    let mut notifications = MockNotificationRepository::new();
    notifications
        .expect_create()
        .withf(move |data| {
            data.user_id == owner
                && data.kind == NotificationKind::Downvote
                && data.message == "Your answer received a downvote"
                && data.answer_id.is_some()
        })
        .returning(|data| {
            Ok(stackit::domain::Notification {
                id: Uuid::new_v4(),
                user_id: data.user_id,
                kind: data.kind,
                message: data.message,
                read: false,
                question_id: data.question_id,
                answer_id: data.answer_id,
                created_at: Utc::now(),
            })
        });

    let service = manager(MockQuestionRepository::new(), answers, notifications);
    let receipt = service
        .cast_vote(voter, VoteTarget::Answer(Uuid::new_v4()), VoteDirection::Down)
        .await
        .unwrap();

    match receipt {
        VoteReceipt::Answer { answer } => assert_eq!(answer.votes, 1),
        VoteReceipt::Question { .. } => panic!("expected an answer receipt"),
    }
}

#[tokio::test]
async fn voting_on_own_answer_creates_no_notification() {
    let voter = Uuid::new_v4();

    let mut answers = MockAnswerRepository::new();
    answers
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_answer(id, voter, 0, vec![]))));
    answers
        .expect_record_vote()
        .returning(move |id, votes, voters| Ok(test_answer(id, voter, votes, voters)));

    // No expectations registered: any notification create would panic
    let notifications = MockNotificationRepository::new();

    let service = manager(MockQuestionRepository::new(), answers, notifications);
    let result = service
        .cast_vote(voter, VoteTarget::Answer(Uuid::new_v4()), VoteDirection::Up)
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn vote_on_missing_target_is_not_found() {
    let mut answers = MockAnswerRepository::new();
    answers.expect_find_by_id().returning(|_| Ok(None));

    let service = manager(MockQuestionRepository::new(), answers, MockNotificationRepository::new());
    let result = service
        .cast_vote(Uuid::new_v4(), VoteTarget::Answer(Uuid::new_v4()), VoteDirection::Up)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}
