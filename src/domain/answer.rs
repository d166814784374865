//! Answer domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Answer domain entity.
///
/// `content` is a schema-free rich-text block document, echoed back to
/// clients exactly as submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub id: Uuid,
    pub content: serde_json::Value,
    pub user_id: Uuid,
    pub question_id: Uuid,
    pub votes: i32,
    pub voters: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Answer {
    /// Check whether a user already appears in the voter list
    pub fn has_voter(&self, user_id: Uuid) -> bool {
        self.voters.contains(&user_id)
    }
}

/// Data for creating an answer
#[derive(Debug, Clone)]
pub struct NewAnswer {
    pub content: serde_json::Value,
    pub user_id: Uuid,
    pub question_id: Uuid,
}
