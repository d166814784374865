//! Notification service - Listing and acknowledging notifications.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::Notification;
use crate::errors::AppResult;
use crate::infra::NotificationRepository;

/// Notification service trait for dependency injection.
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// A user's notifications, unread first then newest, capped at 20
    async fn list_notifications(&self, user_id: Uuid) -> AppResult<Vec<Notification>>;

    /// Mark all of a user's unread notifications as read
    async fn mark_all_read(&self, user_id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of NotificationService.
pub struct NotificationManager {
    notifications: Arc<dyn NotificationRepository>,
}

impl NotificationManager {
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }
}

#[async_trait]
impl NotificationService for NotificationManager {
    async fn list_notifications(&self, user_id: Uuid) -> AppResult<Vec<Notification>> {
        self.notifications.list_for_user(user_id).await
    }

    async fn mark_all_read(&self, user_id: Uuid) -> AppResult<()> {
        self.notifications.mark_all_read(user_id).await
    }
}
