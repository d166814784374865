//! Question service unit tests.
//!
//! Exercises the creation pipeline over mocked repositories and a mocked AI
//! client: tag merging, analysis fallbacks, and duplicate detection.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use stackit::domain::{
    AutoTags, ContentAnalysis, ContentModeration, ContentSummary, Difficulty, DuplicateCheck,
    NewQuestion, Question, QuestionStatus, User, UserRole,
};
use stackit::errors::AppError;
use stackit::infra::{
    MockAiClient, MockAnswerRepository, MockQuestionRepository, MockUserRepository,
};
use stackit::services::{CreateQuestion, QuestionManager, QuestionService};

fn question_from(data: NewQuestion) -> Question {
    Question {
        id: Uuid::new_v4(),
        title: data.title,
        description: data.description,
        tags: data.tags,
        user_id: data.user_id,
        votes: 0,
        voters: vec![],
        status: QuestionStatus::Active,
        views: 0,
        is_answered: false,
        accepted_answer_id: None,
        ai_analysis: data.ai_analysis,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn test_user(id: Uuid) -> User {
    User {
        id,
        name: "Asker".to_string(),
        email: "asker@example.com".to_string(),
        password_hash: Some("hashed".to_string()),
        image: None,
        role: UserRole::User,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn analysis_with_tags(tags: &[&str]) -> ContentAnalysis {
    ContentAnalysis {
        auto_tags: AutoTags {
            tags: tags.iter().map(|t| t.to_string()).collect(),
            confidence: 0.9,
            reasoning: "test".to_string(),
        },
        moderation: ContentModeration {
            is_appropriate: true,
            confidence: 0.9,
            issues: vec![],
            suggestions: vec![],
        },
        summary: ContentSummary {
            summary: "summary".to_string(),
            key_points: vec![],
            category: "Programming".to_string(),
            difficulty: Difficulty::Intermediate,
        },
    }
}

fn rich_text_body(text: &str) -> String {
    format!(
        r#"{{"blocks":[{{"type":"paragraph","data":{{"text":"{}"}}}}]}}"#,
        text
    )
}

fn manager(
    questions: MockQuestionRepository,
    users: MockUserRepository,
    ai: MockAiClient,
) -> QuestionManager {
    QuestionManager::new(
        Arc::new(questions),
        Arc::new(MockAnswerRepository::new()),
        Arc::new(users),
        Arc::new(ai),
    )
}

#[tokio::test]
async fn create_merges_user_and_ai_tags_capped_at_eight() {
    let author = Uuid::new_v4();

    let mut ai = MockAiClient::new();
    ai.expect_analyze_content()
        .returning(|_, _| Ok(analysis_with_tags(&["f", "g", "h", "i", "j", "k"])));
    ai.expect_detect_duplicates()
        .returning(|_, _| Ok(DuplicateCheck::none()));

    let mut questions = MockQuestionRepository::new();
    questions.expect_recent_titles().returning(|| Ok(vec![]));
    questions
        .expect_create()
        .withf(|data| {
            data.tags.len() == 8
                && data.tags[..5] == ["a", "b", "c", "d", "e"].map(String::from)
        })
        .returning(|data| Ok(question_from(data)));

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_user(id))));

    let service = manager(questions, users, ai);
    let created = service
        .create_question(
            author,
            CreateQuestion {
                title: "How to merge tags?".to_string(),
                description: rich_text_body("body"),
                tags: ["a", "b", "c", "d", "e"].map(String::from).to_vec(),
            },
        )
        .await
        .unwrap();

    assert_eq!(created.question.tags.len(), 8);
    assert!(created.ai_analysis.is_some());
}

#[tokio::test]
async fn create_survives_total_ai_failure() {
    let author = Uuid::new_v4();

    let mut ai = MockAiClient::new();
    ai.expect_analyze_content()
        .returning(|_, _| Err(AppError::internal("model unreachable")));
    ai.expect_detect_duplicates()
        .returning(|_, _| Err(AppError::internal("model unreachable")));

    let mut questions = MockQuestionRepository::new();
    questions.expect_recent_titles().returning(|| Ok(vec![]));
    questions
        .expect_create()
        .withf(|data| data.ai_analysis.is_none() && data.tags == vec!["rust".to_string()])
        .returning(|data| Ok(question_from(data)));

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_user(id))));

    let service = manager(questions, users, ai);
    let created = service
        .create_question(
            author,
            CreateQuestion {
                title: "Does it degrade?".to_string(),
                description: rich_text_body("body"),
                tags: vec!["Rust".to_string()],
            },
        )
        .await
        .expect("AI failure must not fail question creation");

    assert!(created.ai_analysis.is_none());
}

#[tokio::test]
async fn create_records_duplicate_check_against_recent_titles() {
    let author = Uuid::new_v4();

    let mut ai = MockAiClient::new();
    ai.expect_analyze_content()
        .returning(|_, _| Ok(analysis_with_tags(&["rust"])));
    ai.expect_detect_duplicates()
        .withf(|_, existing| existing.len() == 2)
        .returning(|_, existing| {
            Ok(DuplicateCheck {
                is_duplicate: true,
                similar_questions: existing.to_vec(),
                confidence: 0.85,
            })
        });

    let mut questions = MockQuestionRepository::new();
    questions.expect_recent_titles().returning(|| {
        Ok(vec![
            "How do I use tokio?".to_string(),
            "What is axum?".to_string(),
        ])
    });
    questions
        .expect_create()
        .withf(|data| {
            data.ai_analysis
                .as_ref()
                .and_then(|a| a.duplicate_check.as_ref())
                .map(|d| d.is_duplicate)
                .unwrap_or(false)
        })
        .returning(|data| Ok(question_from(data)));

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_user(id))));

    let service = manager(questions, users, ai);
    let created = service
        .create_question(
            author,
            CreateQuestion {
                title: "How do I use tokio runtimes?".to_string(),
                description: rich_text_body("body"),
                tags: vec![],
            },
        )
        .await
        .unwrap();

    let check = created
        .ai_analysis
        .unwrap()
        .duplicate_check
        .expect("duplicate check should be recorded");
    assert!(check.is_duplicate);
    assert_eq!(check.similar_questions.len(), 2);
}

#[tokio::test]
async fn create_rejects_non_block_description() {
    let service = manager(
        MockQuestionRepository::new(),
        MockUserRepository::new(),
        MockAiClient::new(),
    );

    let result = service
        .create_question(
            Uuid::new_v4(),
            CreateQuestion {
                title: "Bad body".to_string(),
                description: "just a sentence".to_string(),
                tags: vec![],
            },
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn get_question_increments_views() {
    let question_id = Uuid::new_v4();
    let author = Uuid::new_v4();

    let mut questions = MockQuestionRepository::new();
    questions.expect_record_view().returning(move |id| {
        let mut question = question_from(NewQuestion {
            title: "Viewed".to_string(),
            description: rich_text_body("body"),
            tags: vec![],
            user_id: author,
            ai_analysis: None,
        });
        question.id = id;
        question.views = 7;
        Ok(Some(question))
    });

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_ids()
        .returning(|ids| Ok(ids.into_iter().map(test_user).collect()));

    let mut answers = MockAnswerRepository::new();
    answers.expect_list_by_questions().returning(|_| Ok(vec![]));

    let service = QuestionManager::new(
        Arc::new(questions),
        Arc::new(answers),
        Arc::new(users),
        Arc::new(MockAiClient::new()),
    );

    let view = service.get_question(question_id).await.unwrap();
    assert_eq!(view.views, 7);
    assert!(view.user.is_some());
}

#[tokio::test]
async fn get_unknown_question_is_not_found() {
    let mut questions = MockQuestionRepository::new();
    questions.expect_record_view().returning(|_| Ok(None));

    let service = QuestionManager::new(
        Arc::new(questions),
        Arc::new(MockAnswerRepository::new()),
        Arc::new(MockUserRepository::new()),
        Arc::new(MockAiClient::new()),
    );

    let result = service.get_question(Uuid::new_v4()).await;
    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}
