//! Answer service unit tests.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use stackit::domain::{
    Answer, NewAnswer, Notification, NotificationKind, Question, QuestionStatus,
};
use stackit::errors::AppError;
use stackit::infra::{
    MockAnswerRepository, MockNotificationRepository, MockQuestionRepository, MockUserRepository,
};
use stackit::services::{AnswerManager, AnswerService, CreateAnswer};

fn test_question(id: Uuid, owner: Uuid) -> Question {
    Question {
        id,
        title: "How do I pin a future?".to_string(),
        description: r#"{"blocks":[]}"#.to_string(),
        tags: vec![],
        user_id: owner,
        votes: 0,
        voters: vec![],
        status: QuestionStatus::Active,
        views: 0,
        is_answered: false,
        accepted_answer_id: None,
        ai_analysis: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn answer_from(data: NewAnswer) -> Answer {
    Answer {
        id: Uuid::new_v4(),
        content: data.content,
        user_id: data.user_id,
        question_id: data.question_id,
        votes: 0,
        voters: vec![],
        created_at: Utc::now(),
    }
}

fn notification_from(data: stackit::domain::NewNotification) -> Notification {
    Notification {
        id: Uuid::new_v4(),
        user_id: data.user_id,
        kind: data.kind,
        message: data.message,
        read: false,
        question_id: data.question_id,
        answer_id: data.answer_id,
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn answering_marks_question_and_notifies_owner() {
    let question_id = Uuid::new_v4();
    let owner = Uuid::new_v4();
    let author = Uuid::new_v4();

    let mut questions = MockQuestionRepository::new();
    questions
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_question(id, owner))));
    questions
        .expect_mark_answered()
        .withf(move |id| *id == question_id)
        .returning(|_| Ok(()));

    let mut answers = MockAnswerRepository::new();
    answers.expect_create().returning(|data| Ok(answer_from(data)));

    let mut notifications = MockNotificationRepository::new();
    notifications
        .expect_create()
        .withf(move |data| {
            data.user_id == owner
                && data.kind == NotificationKind::NewAnswer
                && data.message == "New answer on \"How do I pin a future?\""
                && data.question_id == Some(question_id)
        })
        .returning(|data| Ok(notification_from(data)));

    let service = AnswerManager::new(
        Arc::new(answers),
        Arc::new(questions),
        Arc::new(MockUserRepository::new()),
        Arc::new(notifications),
    );

    let answer = service
        .create_answer(
            author,
            CreateAnswer {
                question_id,
                content: serde_json::json!({"blocks": [{"type": "paragraph", "data": {"text": "Use Box::pin"}}]}),
            },
        )
        .await
        .unwrap();

    assert_eq!(answer.question_id, question_id);
    assert_eq!(answer.user_id, author);
}

#[tokio::test]
async fn answering_own_question_creates_no_notification() {
    let question_id = Uuid::new_v4();
    let owner = Uuid::new_v4();

    let mut questions = MockQuestionRepository::new();
    questions
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_question(id, owner))));
    questions.expect_mark_answered().returning(|_| Ok(()));

    let mut answers = MockAnswerRepository::new();
    answers.expect_create().returning(|data| Ok(answer_from(data)));

    // No expectations registered: any notification create would panic
    let notifications = MockNotificationRepository::new();

    let service = AnswerManager::new(
        Arc::new(answers),
        Arc::new(questions),
        Arc::new(MockUserRepository::new()),
        Arc::new(notifications),
    );

    let result = service
        .create_answer(
            owner,
            CreateAnswer {
                question_id,
                content: serde_json::json!({"blocks": []}),
            },
        )
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn answering_unknown_question_is_not_found() {
    let mut questions = MockQuestionRepository::new();
    questions.expect_find_by_id().returning(|_| Ok(None));

    let service = AnswerManager::new(
        Arc::new(MockAnswerRepository::new()),
        Arc::new(questions),
        Arc::new(MockUserRepository::new()),
        Arc::new(MockNotificationRepository::new()),
    );

    let result = service
        .create_answer(
            Uuid::new_v4(),
            CreateAnswer {
                question_id: Uuid::new_v4(),
                content: serde_json::json!({"blocks": []}),
            },
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn listing_populates_authors_and_parent_questions() {
    let author = Uuid::new_v4();
    let question_id = Uuid::new_v4();

    let mut answers = MockAnswerRepository::new();
    answers.expect_list().returning(move |_| {
        Ok(vec![answer_from(NewAnswer {
            content: serde_json::json!({"blocks": []}),
            user_id: author,
            question_id,
        })])
    });

    let mut users = MockUserRepository::new();
    users.expect_find_by_ids().returning(|ids| {
        Ok(ids
            .into_iter()
            .map(|id| stackit::domain::User {
                id,
                name: "Answerer".to_string(),
                email: "answerer@example.com".to_string(),
                password_hash: None,
                image: Some("avatar.png".to_string()),
                role: stackit::domain::UserRole::User,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
            .collect())
    });

    let mut questions = MockQuestionRepository::new();
    questions.expect_find_by_ids().returning(move |ids| {
        Ok(ids
            .into_iter()
            .map(|id| test_question(id, Uuid::new_v4()))
            .collect())
    });

    let service = AnswerManager::new(
        Arc::new(answers),
        Arc::new(questions),
        Arc::new(users),
        Arc::new(MockNotificationRepository::new()),
    );

    let views = service.list_answers(Some(author)).await.unwrap();
    assert_eq!(views.len(), 1);

    let view = &views[0];
    assert_eq!(view.user.as_ref().unwrap().name, "Answerer");
    assert_eq!(
        view.question.as_ref().unwrap().title,
        "How do I pin a future?"
    );
}
