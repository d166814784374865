//! Question service - Listing, fetching, and creating questions.
//!
//! Question creation orchestrates the external AI analysis: content analysis
//! and duplicate detection are each independently guarded so that an AI
//! failure degrades to empty/default analysis instead of failing the request.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use super::answer_service::{dedup, AnswerView};
use crate::domain::{
    merge_tags, richtext, AiAnalysis, Answer, Author, DuplicateCheck, NewQuestion, Question,
    QuestionQuery, QuestionStatus, User,
};
use crate::errors::{AppError, AppResult};
use crate::infra::{AiClient, AnswerRepository, QuestionRepository, UserRepository};

/// Question payload populated with its author and answers
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub id: Uuid,
    #[schema(example = "How do I share state between axum handlers?")]
    pub title: String,
    /// Serialized rich-text block document
    pub description: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Author>,
    pub votes: i32,
    pub voters: Vec<Uuid>,
    pub status: QuestionStatus,
    pub views: i32,
    pub is_answered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_answer_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<AiAnalysis>,
    pub answers: Vec<AnswerView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl QuestionView {
    /// Assemble a view from a question and its populated references.
    pub fn assemble(question: Question, user: Option<Author>, answers: Vec<AnswerView>) -> Self {
        Self {
            id: question.id,
            title: question.title,
            description: question.description,
            tags: question.tags,
            user,
            votes: question.votes,
            voters: question.voters,
            status: question.status,
            views: question.views,
            is_answered: question.is_answered,
            accepted_answer_id: question.accepted_answer_id,
            ai_analysis: question.ai_analysis,
            answers,
            created_at: question.created_at,
            updated_at: question.updated_at,
        }
    }
}

/// Data for creating a question
#[derive(Debug, Clone)]
pub struct CreateQuestion {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
}

/// Result of question creation: the stored question plus the analysis that
/// was produced for it (None when the AI call failed outright).
#[derive(Debug)]
pub struct CreatedQuestion {
    pub question: QuestionView,
    pub ai_analysis: Option<AiAnalysis>,
}

/// Question service trait for dependency injection.
#[async_trait]
pub trait QuestionService: Send + Sync {
    /// List questions matching the criteria, populated with authors and answers
    async fn list_questions(&self, query: QuestionQuery) -> AppResult<Vec<QuestionView>>;

    /// Fetch a question by ID, incrementing its view counter
    async fn get_question(&self, id: Uuid) -> AppResult<QuestionView>;

    /// Create a question, running AI analysis and duplicate detection
    async fn create_question(
        &self,
        author_id: Uuid,
        input: CreateQuestion,
    ) -> AppResult<CreatedQuestion>;
}

/// Concrete implementation of QuestionService.
pub struct QuestionManager {
    questions: Arc<dyn QuestionRepository>,
    answers: Arc<dyn AnswerRepository>,
    users: Arc<dyn UserRepository>,
    ai: Arc<dyn AiClient>,
}

impl QuestionManager {
    pub fn new(
        questions: Arc<dyn QuestionRepository>,
        answers: Arc<dyn AnswerRepository>,
        users: Arc<dyn UserRepository>,
        ai: Arc<dyn AiClient>,
    ) -> Self {
        Self {
            questions,
            answers,
            users,
            ai,
        }
    }

    /// Populate a batch of questions with their authors and answers.
    async fn populate(&self, questions: Vec<Question>) -> AppResult<Vec<QuestionView>> {
        let question_ids: Vec<Uuid> = questions.iter().map(|q| q.id).collect();
        let answers = self.questions_answers(question_ids).await?;

        let mut author_ids: Vec<Uuid> = questions.iter().map(|q| q.user_id).collect();
        author_ids.extend(answers.values().flatten().map(|a| a.user_id));

        let authors: HashMap<Uuid, Author> = self
            .users
            .find_by_ids(dedup(author_ids))
            .await?
            .iter()
            .map(|user: &User| (user.id, Author::from(user)))
            .collect();

        let mut answers = answers;
        Ok(questions
            .into_iter()
            .map(|question| {
                let user = authors.get(&question.user_id).cloned();
                let answer_views = answers
                    .remove(&question.id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|answer| {
                        let answer_author = authors.get(&answer.user_id).cloned();
                        AnswerView::assemble(answer, answer_author, None)
                    })
                    .collect();
                QuestionView::assemble(question, user, answer_views)
            })
            .collect())
    }

    /// Answers grouped by question ID.
    async fn questions_answers(
        &self,
        question_ids: Vec<Uuid>,
    ) -> AppResult<HashMap<Uuid, Vec<Answer>>> {
        let mut grouped: HashMap<Uuid, Vec<Answer>> = HashMap::new();
        for answer in self.answers.list_by_questions(question_ids).await? {
            grouped.entry(answer.question_id).or_default().push(answer);
        }
        Ok(grouped)
    }
}

#[async_trait]
impl QuestionService for QuestionManager {
    async fn list_questions(&self, query: QuestionQuery) -> AppResult<Vec<QuestionView>> {
        let questions = self.questions.list(query).await?;
        self.populate(questions).await
    }

    async fn get_question(&self, id: Uuid) -> AppResult<QuestionView> {
        let question = self
            .questions
            .record_view(id)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut views = self.populate(vec![question]).await?;
        views.pop().ok_or(AppError::NotFound)
    }

    async fn create_question(
        &self,
        author_id: Uuid,
        input: CreateQuestion,
    ) -> AppResult<CreatedQuestion> {
        // Plain-text projection of the rich-text body for the AI prompts
        let plain_text = richtext::plain_text(&input.description)?;

        // AI analysis, guarded: a failure degrades to no analysis
        let analysis = match self.ai.analyze_content(&input.title, &plain_text).await {
            Ok(analysis) => Some(analysis),
            Err(e) => {
                tracing::warn!("AI analysis failed for new question: {}", e);
                None
            }
        };

        // Duplicate check against recent titles, guarded independently
        let duplicate_check = match self.questions.recent_titles().await {
            Ok(titles) => match self.ai.detect_duplicates(&input.title, &titles).await {
                Ok(check) => check,
                Err(e) => {
                    tracing::warn!("Duplicate check failed for new question: {}", e);
                    DuplicateCheck::none()
                }
            },
            Err(e) => {
                tracing::warn!("Could not sample titles for duplicate check: {}", e);
                DuplicateCheck::none()
            }
        };

        // Combine user tags with AI suggestions, capped at 8
        let ai_tags = analysis
            .as_ref()
            .map(|a| a.auto_tags.tags.clone())
            .unwrap_or_default();
        let tags = merge_tags(&input.tags, &ai_tags);

        let ai_analysis = analysis.map(|a| AiAnalysis::new(a, duplicate_check));

        let question = self
            .questions
            .create(NewQuestion {
                title: input.title,
                description: input.description,
                tags,
                user_id: author_id,
                ai_analysis: ai_analysis.clone(),
            })
            .await?;

        let author = self
            .users
            .find_by_id(author_id)
            .await?
            .map(|user| Author::from(&user));

        Ok(CreatedQuestion {
            question: QuestionView::assemble(question, author, vec![]),
            ai_analysis,
        })
    }
}
