//! Question repository implementation.
//!
//! Vote recording is a plain read-modify-write: the caller checks the voter
//! list and this repository persists the adjusted count and list. There is
//! no optimistic locking; concurrent votes race exactly like the original
//! document-store implementation.

use async_trait::async_trait;
use sea_orm::sea_query::{Condition, Expr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use super::entities::question::{self, ActiveModel, Entity as QuestionEntity};
use super::json_value;
use crate::config::{DUPLICATE_CHECK_SAMPLE, QUESTION_LIST_LIMIT};
use crate::domain::{NewQuestion, Question, QuestionFilter, QuestionQuery, QuestionStatus};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Question repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Find question by ID (any status)
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Question>>;

    /// Find questions by a set of IDs (for populating answer listings)
    async fn find_by_ids(&self, ids: Vec<Uuid>) -> AppResult<Vec<Question>>;

    /// List questions matching the given criteria, capped at 50
    async fn list(&self, query: QuestionQuery) -> AppResult<Vec<Question>>;

    /// Titles of the most recently created questions (duplicate-check sample)
    async fn recent_titles(&self) -> AppResult<Vec<String>>;

    /// Create a new question
    async fn create(&self, data: NewQuestion) -> AppResult<Question>;

    /// Persist an adjusted vote count and voter list
    async fn record_vote(&self, id: Uuid, votes: i32, voters: Vec<Uuid>) -> AppResult<Question>;

    /// Set the moderation status
    async fn set_status(&self, id: Uuid, status: QuestionStatus) -> AppResult<Question>;

    /// Increment the view counter, returning the updated question
    async fn record_view(&self, id: Uuid) -> AppResult<Option<Question>>;

    /// Flag the question as having at least one answer
    async fn mark_answered(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of QuestionRepository
pub struct QuestionStore {
    db: DatabaseConnection,
}

impl QuestionStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, id: Uuid) -> AppResult<question::Model> {
        QuestionEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound)
    }
}

#[async_trait]
impl QuestionRepository for QuestionStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Question>> {
        let result = QuestionEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Question::from))
    }

    async fn find_by_ids(&self, ids: Vec<Uuid>) -> AppResult<Vec<Question>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let models = QuestionEntity::find()
            .filter(question::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Question::from).collect())
    }

    async fn list(&self, query: QuestionQuery) -> AppResult<Vec<Question>> {
        let mut condition = Condition::all();

        if !query.include_hidden {
            condition = condition.add(question::Column::Status.is_in(["active", "closed"]));
        }

        if let Some(user_id) = query.user_id {
            condition = condition.add(question::Column::UserId.eq(user_id));
        }

        if let Some(search) = &query.search {
            // Match against the title or any tag, case-insensitively
            let pattern = format!("%{}%", search.to_lowercase());
            condition = condition.add(
                Condition::any()
                    .add(Expr::cust_with_values(
                        "LOWER(title) LIKE ?",
                        [pattern.clone()],
                    ))
                    .add(Expr::cust_with_values("tags::text LIKE ?", [pattern])),
            );
        }

        if let Some(tag) = &query.tag {
            let needle = serde_json::json!([tag.to_lowercase()]).to_string();
            condition = condition.add(Expr::cust_with_values("tags::jsonb @> ?::jsonb", [needle]));
        }

        let mut select = QuestionEntity::find().filter(condition);

        select = match query.filter {
            QuestionFilter::Newest => select.order_by_desc(question::Column::CreatedAt),
            QuestionFilter::Popular => select
                .order_by_desc(question::Column::Votes)
                .order_by_desc(question::Column::CreatedAt),
            QuestionFilter::Unanswered => select
                .filter(question::Column::IsAnswered.eq(false))
                .order_by_desc(question::Column::CreatedAt),
        };

        let models = select
            .limit(QUESTION_LIST_LIMIT)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Question::from).collect())
    }

    async fn recent_titles(&self) -> AppResult<Vec<String>> {
        let models = QuestionEntity::find()
            .order_by_desc(question::Column::CreatedAt)
            .limit(DUPLICATE_CHECK_SAMPLE)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(|m| m.title).collect())
    }

    async fn create(&self, data: NewQuestion) -> AppResult<Question> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(data.title),
            description: Set(data.description),
            tags: Set(json_value(&data.tags)),
            user_id: Set(data.user_id),
            votes: Set(0),
            voters: Set(json_value(&Vec::<Uuid>::new())),
            status: Set(QuestionStatus::Active.to_string()),
            views: Set(0),
            is_answered: Set(false),
            accepted_answer_id: Set(None),
            ai_analysis: Set(data.ai_analysis.as_ref().map(json_value)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Question::from(model))
    }

    async fn record_vote(&self, id: Uuid, votes: i32, voters: Vec<Uuid>) -> AppResult<Question> {
        let model = self.find_model(id).await?;

        let mut active: ActiveModel = model.into();
        active.votes = Set(votes);
        active.voters = Set(json_value(&voters));
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Question::from(model))
    }

    async fn set_status(&self, id: Uuid, status: QuestionStatus) -> AppResult<Question> {
        let model = self.find_model(id).await?;

        let mut active: ActiveModel = model.into();
        active.status = Set(status.to_string());
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Question::from(model))
    }

    async fn record_view(&self, id: Uuid) -> AppResult<Option<Question>> {
        let Some(model) = QuestionEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?
        else {
            return Ok(None);
        };

        let views = model.views + 1;
        let mut active: ActiveModel = model.into();
        active.views = Set(views);

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Some(Question::from(model)))
    }

    async fn mark_answered(&self, id: Uuid) -> AppResult<()> {
        let model = self.find_model(id).await?;

        if model.is_answered {
            return Ok(());
        }

        let mut active: ActiveModel = model.into();
        active.is_answered = Set(true);
        active.updated_at = Set(chrono::Utc::now());

        active.update(&self.db).await.map_err(AppError::from)?;
        Ok(())
    }
}
