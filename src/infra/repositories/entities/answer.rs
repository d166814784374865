//! Answer database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Answer;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "answers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    /// Schema-free rich-text block document
    pub content: Json,
    pub user_id: Uuid,
    pub question_id: Uuid,
    pub votes: i32,
    /// JSON array of voter UUIDs
    pub voters: Json,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Answer {
    fn from(model: Model) -> Self {
        Answer {
            id: model.id,
            content: model.content,
            user_id: model.user_id,
            question_id: model.question_id,
            votes: model.votes,
            voters: serde_json::from_value(model.voters).unwrap_or_default(),
            created_at: model.created_at,
        }
    }
}
