use std::sync::Arc;

use portal_core::model::{Notification, NotificationId, NotificationKind};
use storage::repository::{NewNotificationRecord, NotificationRepository};

use crate::Clock;
use crate::error::NotificationServiceError;

/// Orchestrates the community notification feed.
#[derive(Clone)]
pub struct NotificationService {
    clock: Clock,
    notifications: Arc<dyn NotificationRepository>,
}

impl NotificationService {
    #[must_use]
    pub fn new(clock: Clock, notifications: Arc<dyn NotificationRepository>) -> Self {
        Self {
            clock,
            notifications,
        }
    }

    /// The feed newest-first, as shown in the bell popover.
    ///
    /// # Errors
    ///
    /// Returns `NotificationServiceError::Storage` if repository access
    /// fails.
    pub async fn recent(&self, limit: u32) -> Result<Vec<Notification>, NotificationServiceError> {
        let notifications = self.notifications.list_recent_notifications(limit).await?;
        Ok(notifications)
    }

    /// Flag one notification read.
    ///
    /// # Errors
    ///
    /// Returns `NotificationServiceError::Storage` if it does not exist or
    /// the update fails.
    pub async fn mark_read(&self, id: NotificationId) -> Result<(), NotificationServiceError> {
        self.notifications.mark_notification_read(id).await?;
        Ok(())
    }

    /// Broadcast a notification to the community feed.
    ///
    /// # Errors
    ///
    /// Returns `NotificationServiceError::Storage` if persistence fails.
    pub async fn broadcast(
        &self,
        title: &str,
        message: &str,
        kind: NotificationKind,
    ) -> Result<NotificationId, NotificationServiceError> {
        let id = self
            .notifications
            .append_notification(NewNotificationRecord {
                title: title.to_owned(),
                message: message.to_owned(),
                kind,
                created_at: self.clock.now(),
            })
            .await?;
        tracing::info!(notification = %id, kind = kind.as_str(), title, "notification broadcast");
        Ok(id)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::time::fixed_clock;
    use storage::repository::InMemoryRepository;

    #[tokio::test]
    async fn broadcast_then_mark_read() {
        let service = NotificationService::new(fixed_clock(), Arc::new(InMemoryRepository::new()));
        let id = service
            .broadcast(
                "New Sermon",
                "A new message is in the library.",
                NotificationKind::Info,
            )
            .await
            .unwrap();

        let feed = service.recent(5).await.unwrap();
        assert_eq!(feed.len(), 1);
        assert!(!feed[0].is_read());

        service.mark_read(id).await.unwrap();
        assert!(service.recent(5).await.unwrap()[0].is_read());
    }
}
