//! Notification repository implementation.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use super::entities::notification::{self, ActiveModel, Entity as NotificationEntity};
use crate::config::NOTIFICATION_LIST_LIMIT;
use crate::domain::{NewNotification, Notification};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Notification repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Create a new unread notification
    async fn create(&self, data: NewNotification) -> AppResult<Notification>;

    /// List a user's notifications, unread first then newest, capped at 20
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Notification>>;

    /// Mark all of a user's unread notifications as read
    async fn mark_all_read(&self, user_id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of NotificationRepository
pub struct NotificationStore {
    db: DatabaseConnection,
}

impl NotificationStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NotificationRepository for NotificationStore {
    async fn create(&self, data: NewNotification) -> AppResult<Notification> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(data.user_id),
            kind: Set(data.kind.as_str().to_string()),
            message: Set(data.message),
            read: Set(false),
            question_id: Set(data.question_id),
            answer_id: Set(data.answer_id),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Notification::from(model))
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Notification>> {
        let models = NotificationEntity::find()
            .filter(notification::Column::UserId.eq(user_id))
            .order_by_asc(notification::Column::Read)
            .order_by_desc(notification::Column::CreatedAt)
            .limit(NOTIFICATION_LIST_LIMIT)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Notification::from).collect())
    }

    async fn mark_all_read(&self, user_id: Uuid) -> AppResult<()> {
        NotificationEntity::update_many()
            .col_expr(notification::Column::Read, Expr::value(true))
            .filter(notification::Column::UserId.eq(user_id))
            .filter(notification::Column::Read.eq(false))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(())
    }
}
