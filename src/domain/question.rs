//! Question domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::analysis::AiAnalysis;
use crate::config::MAX_TAGS;

/// Question lifecycle status.
///
/// Questions are never hard-deleted; moderation flips the status instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum QuestionStatus {
    Active,
    Moderated,
    Closed,
    Deleted,
}

impl QuestionStatus {
    /// Statuses visible in public listings
    pub fn is_public(&self) -> bool {
        matches!(self, QuestionStatus::Active | QuestionStatus::Closed)
    }
}

impl From<&str> for QuestionStatus {
    fn from(s: &str) -> Self {
        match s {
            "moderated" => QuestionStatus::Moderated,
            "closed" => QuestionStatus::Closed,
            "deleted" => QuestionStatus::Deleted,
            _ => QuestionStatus::Active,
        }
    }
}

impl std::fmt::Display for QuestionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            QuestionStatus::Active => "active",
            QuestionStatus::Moderated => "moderated",
            QuestionStatus::Closed => "closed",
            QuestionStatus::Deleted => "deleted",
        };
        write!(f, "{}", s)
    }
}

/// Admin moderation action keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ModerationAction {
    Approve,
    Moderate,
    Delete,
}

impl ModerationAction {
    /// Status a question transitions to for this action
    pub fn target_status(&self) -> QuestionStatus {
        match self {
            ModerationAction::Approve => QuestionStatus::Active,
            ModerationAction::Moderate => QuestionStatus::Moderated,
            ModerationAction::Delete => QuestionStatus::Deleted,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationAction::Approve => "approve",
            ModerationAction::Moderate => "moderate",
            ModerationAction::Delete => "delete",
        }
    }
}

/// Sort/filter mode for question listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum QuestionFilter {
    #[default]
    Newest,
    Popular,
    Unanswered,
}

/// Question domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: Uuid,
    pub title: String,
    /// Serialized rich-text block document, stored verbatim
    pub description: String,
    pub tags: Vec<String>,
    pub user_id: Uuid,
    pub votes: i32,
    pub voters: Vec<Uuid>,
    pub status: QuestionStatus,
    pub views: i32,
    pub is_answered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_answer_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<AiAnalysis>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Question {
    /// Check whether a user already appears in the voter list
    pub fn has_voter(&self, user_id: Uuid) -> bool {
        self.voters.contains(&user_id)
    }
}

/// Criteria for question listings
#[derive(Debug, Clone, Default)]
pub struct QuestionQuery {
    /// Restrict to questions by this author
    pub user_id: Option<Uuid>,
    /// Substring match against title or tags
    pub search: Option<String>,
    /// Exact tag match
    pub tag: Option<String>,
    pub filter: QuestionFilter,
    /// When false, moderated and deleted questions are excluded
    pub include_hidden: bool,
}

/// Data for creating a question
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub user_id: Uuid,
    pub ai_analysis: Option<AiAnalysis>,
}

/// Merge user-supplied tags with AI-suggested ones.
///
/// Tags are trimmed, lowercased, de-duplicated preserving first occurrence,
/// and capped at [`MAX_TAGS`]. User tags take precedence over AI suggestions.
pub fn merge_tags(user_tags: &[String], ai_tags: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::new();

    for tag in user_tags.iter().chain(ai_tags.iter()) {
        let normalized = tag.trim().to_lowercase();
        if normalized.is_empty() || merged.contains(&normalized) {
            continue;
        }
        merged.push(normalized);
        if merged.len() == MAX_TAGS {
            break;
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn merge_caps_at_eight_tags() {
        let user = tags(&["a", "b", "c", "d", "e"]);
        let ai = tags(&["f", "g", "h", "i", "j"]);

        let merged = merge_tags(&user, &ai);
        assert_eq!(merged.len(), 8);
        // User tags come first
        assert_eq!(&merged[..5], &tags(&["a", "b", "c", "d", "e"])[..]);
    }

    #[test]
    fn merge_deduplicates_preserving_order() {
        let user = tags(&["rust", "async"]);
        let ai = tags(&["Async", "rust", "tokio"]);

        assert_eq!(merge_tags(&user, &ai), tags(&["rust", "async", "tokio"]));
    }

    #[test]
    fn merge_normalizes_case_and_whitespace() {
        let user = tags(&["  Rust  ", ""]);
        let ai = tags(&["WebDev"]);

        assert_eq!(merge_tags(&user, &ai), tags(&["rust", "webdev"]));
    }

    #[test]
    fn moderation_actions_map_to_statuses() {
        assert_eq!(
            ModerationAction::Approve.target_status(),
            QuestionStatus::Active
        );
        assert_eq!(
            ModerationAction::Moderate.target_status(),
            QuestionStatus::Moderated
        );
        assert_eq!(
            ModerationAction::Delete.target_status(),
            QuestionStatus::Deleted
        );
    }

    #[test]
    fn moderated_and_deleted_are_not_public() {
        assert!(QuestionStatus::Active.is_public());
        assert!(QuestionStatus::Closed.is_public());
        assert!(!QuestionStatus::Moderated.is_public());
        assert!(!QuestionStatus::Deleted.is_public());
    }
}
