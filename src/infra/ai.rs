//! Generative-language API client (Gemini).
//!
//! Every operation follows the same contract: send a fixed prompt template,
//! pull the first JSON blob out of the model text, and parse it into a typed
//! result. Any failure along the way (missing key, network, non-2xx, empty
//! candidates, unparseable blob) logs a warning and degrades to the
//! operation's static fallback payload, so AI trouble never fails a request.
//! No retries, no circuit breaking.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::{Config, MAX_ANSWER_SUGGESTIONS};
use crate::domain::{AutoTags, ContentAnalysis, ContentModeration, ContentSummary, DuplicateCheck};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// AI analysis client trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AiClient: Send + Sync {
    /// Combined auto-tags + moderation + summary in one model call
    async fn analyze_content(&self, title: &str, content: &str) -> AppResult<ContentAnalysis>;

    /// Suggest 3-5 tags for the content
    async fn auto_tag(&self, title: &str, content: &str) -> AppResult<AutoTags>;

    /// Moderate the content for appropriateness
    async fn moderate(&self, title: &str, content: &str) -> AppResult<ContentModeration>;

    /// Summarize and categorize the content
    async fn summarize(&self, title: &str, content: &str) -> AppResult<ContentSummary>;

    /// Suggest answer approaches for a question
    async fn answer_suggestions(&self, question: &str) -> AppResult<Vec<String>>;

    /// Check whether a new title duplicates any of the given existing titles
    async fn detect_duplicates(
        &self,
        title: &str,
        existing: &[String],
    ) -> AppResult<DuplicateCheck>;
}

/// First `{...}` blob in the model output
static JSON_BLOB: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{[\s\S]*\}").expect("valid regex"));

/// Numbered list item prefix ("1. ", "2. ", ...)
static LIST_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s*").expect("valid regex"));

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

/// Gemini-backed implementation of [`AiClient`].
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a client from application configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.gemini_api_key.clone(),
            model: config.gemini_model.clone(),
            base_url: config.gemini_base_url.clone(),
        }
    }

    /// Send a prompt and return the raw model text.
    async fn generate(&self, prompt: String) -> AppResult<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::internal("GEMINI_API_KEY is not configured"))?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, api_key
        );

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::internal(format!("Gemini request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::internal(format!(
                "Gemini API returned {}",
                response.status()
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AppError::internal(format!("Gemini response decode failed: {}", e)))?;

        body.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| AppError::internal("Empty response from Gemini"))
    }

    /// Send a prompt and parse the JSON blob in the reply into `T`.
    async fn generate_json<T: DeserializeOwned>(&self, prompt: String) -> AppResult<T> {
        let text = self.generate(prompt).await?;
        let blob = extract_json(&text)?;
        serde_json::from_str(blob)
            .map_err(|e| AppError::internal(format!("Invalid response format from Gemini: {}", e)))
    }
}

#[async_trait]
impl AiClient for GeminiClient {
    async fn analyze_content(&self, title: &str, content: &str) -> AppResult<ContentAnalysis> {
        match self.generate_json(prompts::analyze(title, content)).await {
            Ok(analysis) => Ok(analysis),
            Err(e) => {
                tracing::warn!("Content analysis failed, using fallback: {}", e);
                Ok(ContentAnalysis::fallback())
            }
        }
    }

    async fn auto_tag(&self, title: &str, content: &str) -> AppResult<AutoTags> {
        match self.generate_json(prompts::auto_tag(title, content)).await {
            Ok(tags) => Ok(tags),
            Err(e) => {
                tracing::warn!("Auto-tagging failed, using fallback: {}", e);
                Ok(AutoTags::fallback())
            }
        }
    }

    async fn moderate(&self, title: &str, content: &str) -> AppResult<ContentModeration> {
        match self.generate_json(prompts::moderate(title, content)).await {
            Ok(moderation) => Ok(moderation),
            Err(e) => {
                tracing::warn!("Moderation failed, using fallback: {}", e);
                Ok(ContentModeration::fallback())
            }
        }
    }

    async fn summarize(&self, title: &str, content: &str) -> AppResult<ContentSummary> {
        match self.generate_json(prompts::summarize(title, content)).await {
            Ok(summary) => Ok(summary),
            Err(e) => {
                tracing::warn!("Summarization failed, using fallback: {}", e);
                Ok(ContentSummary::fallback())
            }
        }
    }

    async fn answer_suggestions(&self, question: &str) -> AppResult<Vec<String>> {
        match self.generate(prompts::answer_suggestions(question)).await {
            Ok(text) => Ok(parse_numbered_list(&text)),
            Err(e) => {
                tracing::warn!("Answer suggestions failed, using fallback: {}", e);
                Ok(fallback_suggestions())
            }
        }
    }

    async fn detect_duplicates(
        &self,
        title: &str,
        existing: &[String],
    ) -> AppResult<DuplicateCheck> {
        match self
            .generate_json(prompts::detect_duplicates(title, existing))
            .await
        {
            Ok(check) => Ok(check),
            Err(e) => {
                tracing::warn!("Duplicate detection failed, using fallback: {}", e);
                Ok(DuplicateCheck::fallback())
            }
        }
    }
}

/// Extract the first JSON object blob from model text.
fn extract_json(text: &str) -> AppResult<&str> {
    JSON_BLOB
        .find(text)
        .map(|m| m.as_str())
        .ok_or_else(|| AppError::internal("No JSON object in Gemini response"))
}

/// Extract a numbered list from model text, capped at 5 items.
fn parse_numbered_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| LIST_ITEM.is_match(line))
        .map(|line| LIST_ITEM.replace(line, "").trim().to_string())
        .filter(|item| !item.is_empty())
        .take(MAX_ANSWER_SUGGESTIONS)
        .collect()
}

/// Static suggestions when the model is unavailable.
fn fallback_suggestions() -> Vec<String> {
    vec![
        "Consider providing a detailed explanation".to_string(),
        "Include relevant examples".to_string(),
        "Reference official documentation".to_string(),
    ]
}

/// Prompt templates for each analysis operation.
mod prompts {
    pub fn analyze(title: &str, content: &str) -> String {
        format!(
            r#"
Analyze this Q&A content and provide comprehensive insights:

TITLE: {title}
CONTENT: {content}

Please provide analysis in the following JSON format:
{{
  "autoTags": {{
    "tags": ["tag1", "tag2", "tag3"],
    "confidence": 0.95,
    "reasoning": "Explanation of why these tags were chosen"
  }},
  "moderation": {{
    "isAppropriate": true,
    "confidence": 0.98,
    "issues": [],
    "suggestions": ["suggestion1", "suggestion2"]
  }},
  "summary": {{
    "summary": "Brief summary of the content",
    "keyPoints": ["point1", "point2", "point3"],
    "category": "Technology/Programming/General",
    "difficulty": "intermediate"
  }}
}}

Guidelines:
- Tags: Choose 3-5 relevant, specific tags that would help others find this content
- Moderation: Check for inappropriate content, spam, or violations
- Summary: Provide a concise summary and categorize the content
- Difficulty: Assess if this is beginner, intermediate, or advanced level
- Be strict but fair in moderation
- Focus on technical accuracy and helpfulness
"#
        )
    }

    pub fn auto_tag(title: &str, content: &str) -> String {
        format!(
            r#"
Analyze this content and suggest 3-5 relevant tags:

TITLE: {title}
CONTENT: {content}

Provide tags that are:
- Specific and relevant to the content
- Commonly used in Q&A platforms
- Helpful for categorization and search
- Technical when appropriate

Return as JSON:
{{
  "tags": ["tag1", "tag2", "tag3"],
  "confidence": 0.95,
  "reasoning": "Why these tags were chosen"
}}
"#
        )
    }

    pub fn moderate(title: &str, content: &str) -> String {
        format!(
            r#"
Moderate this content for appropriateness:

TITLE: {title}
CONTENT: {content}

Check for:
- Inappropriate or offensive content
- Spam or promotional content
- Personal attacks or harassment
- Copyright violations
- Misinformation or harmful advice

Return as JSON:
{{
  "isAppropriate": true/false,
  "confidence": 0.95,
  "issues": ["issue1", "issue2"],
  "suggestions": ["suggestion1", "suggestion2"]
}}

Be strict but fair. Flag content that violates community guidelines.
"#
        )
    }

    pub fn summarize(title: &str, content: &str) -> String {
        format!(
            r#"
Summarize this Q&A content:

TITLE: {title}
CONTENT: {content}

Provide:
1. A concise summary (2-3 sentences)
2. Key points or takeaways
3. Content category (Technology, Programming, General, etc.)
4. Difficulty level (beginner, intermediate, advanced)

Return as JSON:
{{
  "summary": "Brief summary",
  "keyPoints": ["point1", "point2", "point3"],
  "category": "Technology",
  "difficulty": "intermediate"
}}
"#
        )
    }

    pub fn answer_suggestions(question: &str) -> String {
        format!(
            r#"
Given this question, suggest 3-5 helpful answer approaches:

QUESTION: {question}

Suggest different angles or approaches to answer this question effectively.
Focus on being helpful and comprehensive.

Return as a simple list:
1. First approach
2. Second approach
3. Third approach
"#
        )
    }

    pub fn detect_duplicates(title: &str, existing: &[String]) -> String {
        let numbered = existing
            .iter()
            .enumerate()
            .map(|(i, q)| format!("{}. {}", i + 1, q))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"
Check if this new question is a duplicate of existing questions:

NEW QUESTION: {title}

EXISTING QUESTIONS:
{numbered}

Analyze if the new question is asking the same thing as any existing questions.
Consider:
- Core topic similarity
- Specific problem being solved
- Technical context

Return as JSON:
{{
  "isDuplicate": true/false,
  "similarQuestions": ["question1", "question2"],
  "confidence": 0.85
}}
"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_json_blob_from_fenced_reply() {
        let text = "Here is the analysis:\n```json\n{\"tags\": [\"rust\"], \"confidence\": 0.9, \"reasoning\": \"r\"}\n```";
        let blob = extract_json(text).unwrap();
        let parsed: AutoTags = serde_json::from_str(blob).unwrap();
        assert_eq!(parsed.tags, vec!["rust".to_string()]);
    }

    #[test]
    fn missing_json_blob_is_an_error() {
        assert!(extract_json("no structured data here").is_err());
    }

    #[test]
    fn parses_numbered_list() {
        let text = "Sure! Here are some approaches:\n1. Explain the borrow checker\n2. Show a minimal example\n\nHope this helps.";
        assert_eq!(
            parse_numbered_list(text),
            vec![
                "Explain the borrow checker".to_string(),
                "Show a minimal example".to_string(),
            ]
        );
    }

    #[test]
    fn numbered_list_is_capped_at_five() {
        let text = "1. a\n2. b\n3. c\n4. d\n5. e\n6. f\n7. g";
        assert_eq!(parse_numbered_list(text).len(), 5);
    }

    #[test]
    fn duplicate_prompt_numbers_existing_titles() {
        let existing = vec!["How do I use tokio?".to_string(), "What is axum?".to_string()];
        let prompt = prompts::detect_duplicates("Using tokio runtimes", &existing);
        assert!(prompt.contains("1. How do I use tokio?"));
        assert!(prompt.contains("2. What is axum?"));
    }
}
