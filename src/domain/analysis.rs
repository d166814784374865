//! AI analysis result types.
//!
//! These mirror the JSON shapes the generative-language API is prompted to
//! return. Each carries a static fallback used when the external call fails,
//! so analysis never blocks content creation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Suggested tags for a piece of content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AutoTags {
    pub tags: Vec<String>,
    pub confidence: f64,
    pub reasoning: String,
}

impl AutoTags {
    pub fn fallback() -> Self {
        Self {
            tags: vec!["general".to_string()],
            confidence: 0.5,
            reasoning: "Fallback tagging due to API error".to_string(),
        }
    }
}

/// Moderation verdict for a piece of content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentModeration {
    pub is_appropriate: bool,
    pub confidence: f64,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
}

impl ContentModeration {
    pub fn fallback() -> Self {
        Self {
            is_appropriate: true,
            confidence: 0.5,
            issues: vec![],
            suggestions: vec!["Unable to analyze content due to API error".to_string()],
        }
    }
}

/// Difficulty assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

/// Summary and categorization of a piece of content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentSummary {
    pub summary: String,
    pub key_points: Vec<String>,
    pub category: String,
    #[serde(default)]
    pub difficulty: Difficulty,
}

impl ContentSummary {
    pub fn fallback() -> Self {
        Self {
            summary: "Content summary unavailable".to_string(),
            key_points: vec!["Unable to extract key points".to_string()],
            category: "General".to_string(),
            difficulty: Difficulty::Intermediate,
        }
    }
}

/// Duplicate-question verdict against a sample of existing titles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateCheck {
    pub is_duplicate: bool,
    pub similar_questions: Vec<String>,
    pub confidence: f64,
}

impl DuplicateCheck {
    /// Default verdict when the check was never performed
    pub fn none() -> Self {
        Self {
            is_duplicate: false,
            similar_questions: vec![],
            confidence: 0.0,
        }
    }

    /// Fallback verdict when the external call failed
    pub fn fallback() -> Self {
        Self {
            is_duplicate: false,
            similar_questions: vec![],
            confidence: 0.5,
        }
    }
}

/// Combined analysis produced in a single model call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentAnalysis {
    pub auto_tags: AutoTags,
    pub moderation: ContentModeration,
    pub summary: ContentSummary,
}

impl ContentAnalysis {
    pub fn fallback() -> Self {
        Self {
            auto_tags: AutoTags {
                tags: vec!["general".to_string()],
                confidence: 0.5,
                reasoning: "Fallback analysis due to API error".to_string(),
            },
            moderation: ContentModeration {
                is_appropriate: true,
                confidence: 0.5,
                issues: vec![],
                suggestions: vec!["Unable to analyze content".to_string()],
            },
            summary: ContentSummary::fallback(),
        }
    }
}

/// Analysis sub-document persisted on a question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    pub auto_tags: AutoTags,
    pub moderation: ContentModeration,
    pub summary: ContentSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicate_check: Option<DuplicateCheck>,
}

impl AiAnalysis {
    pub fn new(analysis: ContentAnalysis, duplicate_check: DuplicateCheck) -> Self {
        Self {
            auto_tags: analysis.auto_tags,
            moderation: analysis.moderation,
            summary: analysis.summary,
            duplicate_check: Some(duplicate_check),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_serializes_with_camel_case_keys() {
        let analysis = AiAnalysis::new(ContentAnalysis::fallback(), DuplicateCheck::none());
        let json = serde_json::to_value(&analysis).unwrap();

        assert!(json.get("autoTags").is_some());
        assert!(json.get("moderation").is_some());
        assert!(json["moderation"].get("isAppropriate").is_some());
        assert!(json["summary"].get("keyPoints").is_some());
        assert!(json["duplicateCheck"].get("isDuplicate").is_some());
    }

    #[test]
    fn difficulty_defaults_to_intermediate() {
        let summary: ContentSummary = serde_json::from_value(serde_json::json!({
            "summary": "s",
            "keyPoints": [],
            "category": "General"
        }))
        .unwrap();
        assert_eq!(summary.difficulty, Difficulty::Intermediate);
    }
}
