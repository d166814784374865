//! Notification domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Notification type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    NewAnswer,
    Upvote,
    Downvote,
    Mention,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::NewAnswer => "new_answer",
            NotificationKind::Upvote => "upvote",
            NotificationKind::Downvote => "downvote",
            NotificationKind::Mention => "mention",
        }
    }
}

impl From<&str> for NotificationKind {
    fn from(s: &str) -> Self {
        match s {
            "new_answer" => NotificationKind::NewAnswer,
            "upvote" => NotificationKind::Upvote,
            "downvote" => NotificationKind::Downvote,
            _ => NotificationKind::Mention,
        }
    }
}

/// Notification domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    /// Recipient
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    pub read: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Data for creating a notification
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    pub question_id: Option<Uuid>,
    pub answer_id: Option<Uuid>,
}
