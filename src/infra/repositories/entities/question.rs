//! Question database entity for SeaORM.
//!
//! Document-shaped fields of the original data model (tags, voter list,
//! AI analysis sub-document) are kept as JSON columns.

use sea_orm::entity::prelude::*;

use crate::domain::{Question, QuestionStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub title: String,
    /// Serialized rich-text block document
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// JSON array of lowercase tag strings
    pub tags: Json,
    pub user_id: Uuid,
    pub votes: i32,
    /// JSON array of voter UUIDs
    pub voters: Json,
    pub status: String,
    pub views: i32,
    pub is_answered: bool,
    pub accepted_answer_id: Option<Uuid>,
    pub ai_analysis: Option<Json>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Question {
    fn from(model: Model) -> Self {
        Question {
            id: model.id,
            title: model.title,
            description: model.description,
            tags: serde_json::from_value(model.tags).unwrap_or_default(),
            user_id: model.user_id,
            votes: model.votes,
            voters: serde_json::from_value(model.voters).unwrap_or_default(),
            status: QuestionStatus::from(model.status.as_str()),
            views: model.views,
            is_answered: model.is_answered,
            accepted_answer_id: model.accepted_answer_id,
            ai_analysis: model
                .ai_analysis
                .and_then(|value| serde_json::from_value(value).ok()),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
