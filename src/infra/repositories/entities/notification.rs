//! Notification database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Notification, NotificationKind};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    /// Recipient
    pub user_id: Uuid,
    pub kind: String,
    pub message: String,
    pub read: bool,
    pub question_id: Option<Uuid>,
    pub answer_id: Option<Uuid>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Notification {
    fn from(model: Model) -> Self {
        Notification {
            id: model.id,
            user_id: model.user_id,
            kind: NotificationKind::from(model.kind.as_str()),
            message: model.message,
            read: model.read,
            question_id: model.question_id,
            answer_id: model.answer_id,
            created_at: model.created_at,
        }
    }
}
