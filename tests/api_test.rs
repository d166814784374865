//! API-level tests.
//!
//! These validate error-to-status mapping, wire shapes of responses, and the
//! auth service contract using mock implementations, without requiring a
//! database or network.

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use uuid::Uuid;

use stackit::domain::{
    Answer, Notification, NotificationKind, Question, QuestionStatus, User, UserResponse, UserRole,
};
use stackit::errors::{AppError, AppResult};
use stackit::services::{AuthService, Claims, TokenResponse, VoteReceipt};

// =============================================================================
// Mock Services for Testing
// =============================================================================

/// Mock auth service that returns predefined responses
struct MockAuthService;

#[async_trait]
impl AuthService for MockAuthService {
    async fn register(&self, name: String, email: String, _password: String) -> AppResult<User> {
        Ok(User {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash: Some("hashed".to_string()),
            image: None,
            role: UserRole::User,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
    }

    async fn login(&self, _email: String, _password: String) -> AppResult<TokenResponse> {
        Ok(TokenResponse {
            access_token: "mock-token".to_string(),
            token_type: "Bearer".to_string(),
            expires_in: 86400,
        })
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        if token == "valid-test-token" {
            Ok(Claims {
                sub: Uuid::new_v4(),
                email: "test@example.com".to_string(),
                role: "user".to_string(),
                exp: Utc::now().timestamp() + 3600,
                iat: Utc::now().timestamp(),
            })
        } else {
            Err(AppError::Unauthorized)
        }
    }
}

// =============================================================================
// Error Type Tests
// =============================================================================

#[tokio::test]
async fn test_app_error_status_codes() {
    let cases = [
        (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
        (AppError::InvalidCredentials, StatusCode::UNAUTHORIZED),
        (AppError::Forbidden, StatusCode::FORBIDDEN),
        (AppError::NotFound, StatusCode::NOT_FOUND),
        (AppError::conflict("User"), StatusCode::CONFLICT),
        (AppError::AlreadyVoted, StatusCode::BAD_REQUEST),
        (
            AppError::validation("missing field"),
            StatusCode::BAD_REQUEST,
        ),
        (
            AppError::bad_request("Missing answerId or questionId"),
            StatusCode::BAD_REQUEST,
        ),
        (AppError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR),
    ];

    for (error, expected) in cases {
        let response = error.into_response();
        assert_eq!(response.status(), expected);
    }
}

#[tokio::test]
async fn test_error_body_carries_error_object() {
    let response = AppError::AlreadyVoted.into_response();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"]["code"], "ALREADY_VOTED");
    assert_eq!(json["error"]["message"], "Already voted");
}

// =============================================================================
// Wire Shape Tests
// =============================================================================

fn sample_question() -> Question {
    Question {
        id: Uuid::new_v4(),
        title: "Sample".to_string(),
        description: r#"{"blocks":[]}"#.to_string(),
        tags: vec!["rust".to_string()],
        user_id: Uuid::new_v4(),
        votes: 1,
        voters: vec![Uuid::new_v4()],
        status: QuestionStatus::Active,
        views: 2,
        is_answered: false,
        accepted_answer_id: None,
        ai_analysis: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_vote_receipt_wraps_target_entity() {
    let receipt = VoteReceipt::Question {
        question: sample_question(),
    };
    let json = serde_json::to_value(&receipt).unwrap();
    assert!(json.get("question").is_some());
    assert_eq!(json["question"]["isAnswered"], false);

    let receipt = VoteReceipt::Answer {
        answer: Answer {
            id: Uuid::new_v4(),
            content: serde_json::json!({"blocks": []}),
            user_id: Uuid::new_v4(),
            question_id: Uuid::new_v4(),
            votes: -1,
            voters: vec![],
            created_at: Utc::now(),
        },
    };
    let json = serde_json::to_value(&receipt).unwrap();
    assert!(json.get("answer").is_some());
    assert_eq!(json["answer"]["votes"], -1);
}

#[tokio::test]
async fn test_notification_serializes_kind_as_type() {
    let notification = Notification {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        kind: NotificationKind::NewAnswer,
        message: "New answer on \"Sample\"".to_string(),
        read: false,
        question_id: Some(Uuid::new_v4()),
        answer_id: None,
        created_at: Utc::now(),
    };

    let json = serde_json::to_value(&notification).unwrap();
    assert_eq!(json["type"], "new_answer");
    assert_eq!(json["read"], false);
    assert!(json.get("questionId").is_some());
    assert!(json.get("answerId").is_none());
}

#[tokio::test]
async fn test_user_response_omits_credentials() {
    let user = User {
        id: Uuid::new_v4(),
        name: "Test".to_string(),
        email: "test@example.com".to_string(),
        password_hash: Some("secret".to_string()),
        image: None,
        role: UserRole::Admin,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    let response = UserResponse::from(user);
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["role"], "admin");
    assert!(json.get("password_hash").is_none());
    assert!(json.get("passwordHash").is_none());
}

// =============================================================================
// Mock Service Tests
// =============================================================================

#[tokio::test]
async fn test_mock_auth_service_register() {
    let service = MockAuthService;
    let user = service
        .register(
            "New User".to_string(),
            "new@example.com".to_string(),
            "password123".to_string(),
        )
        .await
        .unwrap();

    assert_eq!(user.email, "new@example.com");
    assert_eq!(user.name, "New User");
}

#[tokio::test]
async fn test_mock_auth_service_verify_token() {
    let service = MockAuthService;

    let claims = service.verify_token("valid-test-token").unwrap();
    assert_eq!(claims.email, "test@example.com");

    let result = service.verify_token("invalid-token");
    assert!(matches!(result.unwrap_err(), AppError::Unauthorized));
}

// =============================================================================
// JWT Claims Tests
// =============================================================================

#[tokio::test]
async fn test_claims_structure() {
    let claims = Claims {
        sub: Uuid::new_v4(),
        email: "test@example.com".to_string(),
        role: "user".to_string(),
        exp: Utc::now().timestamp() + 3600,
        iat: Utc::now().timestamp(),
    };

    assert!(!claims.email.is_empty());
    assert!(claims.exp > claims.iat);
}
