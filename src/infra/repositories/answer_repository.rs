//! Answer repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::answer::{self, ActiveModel, Entity as AnswerEntity};
use super::json_value;
use crate::domain::{Answer, NewAnswer};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Answer repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AnswerRepository: Send + Sync {
    /// Find answer by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Answer>>;

    /// List answers, optionally restricted to one author
    async fn list(&self, user_id: Option<Uuid>) -> AppResult<Vec<Answer>>;

    /// List answers belonging to a set of questions (for populating listings)
    async fn list_by_questions(&self, question_ids: Vec<Uuid>) -> AppResult<Vec<Answer>>;

    /// Create a new answer
    async fn create(&self, data: NewAnswer) -> AppResult<Answer>;

    /// Persist an adjusted vote count and voter list
    async fn record_vote(&self, id: Uuid, votes: i32, voters: Vec<Uuid>) -> AppResult<Answer>;
}

/// Concrete implementation of AnswerRepository
pub struct AnswerStore {
    db: DatabaseConnection,
}

impl AnswerStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AnswerRepository for AnswerStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Answer>> {
        let result = AnswerEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Answer::from))
    }

    async fn list(&self, user_id: Option<Uuid>) -> AppResult<Vec<Answer>> {
        let mut select = AnswerEntity::find();

        if let Some(user_id) = user_id {
            select = select.filter(answer::Column::UserId.eq(user_id));
        }

        let models = select
            .order_by_desc(answer::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Answer::from).collect())
    }

    async fn list_by_questions(&self, question_ids: Vec<Uuid>) -> AppResult<Vec<Answer>> {
        if question_ids.is_empty() {
            return Ok(vec![]);
        }

        let models = AnswerEntity::find()
            .filter(answer::Column::QuestionId.is_in(question_ids))
            .order_by_asc(answer::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Answer::from).collect())
    }

    async fn create(&self, data: NewAnswer) -> AppResult<Answer> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            content: Set(data.content),
            user_id: Set(data.user_id),
            question_id: Set(data.question_id),
            votes: Set(0),
            voters: Set(json_value(&Vec::<Uuid>::new())),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Answer::from(model))
    }

    async fn record_vote(&self, id: Uuid, votes: i32, voters: Vec<Uuid>) -> AppResult<Answer> {
        let model = AnswerEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = model.into();
        active.votes = Set(votes);
        active.voters = Set(json_value(&voters));

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Answer::from(model))
    }
}
