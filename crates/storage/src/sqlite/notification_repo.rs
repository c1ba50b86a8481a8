use portal_core::model::{Notification, NotificationId};

use super::SqliteRepository;
use super::mapping::{i64_from_u64, map_notification_row, u64_from_i64};
use crate::repository::{NewNotificationRecord, NotificationRepository, StorageError};

#[async_trait::async_trait]
impl NotificationRepository for SqliteRepository {
    async fn append_notification(
        &self,
        notification: NewNotificationRecord,
    ) -> Result<NotificationId, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO notifications (title, message, kind, is_read, created_at)
            VALUES (?1, ?2, ?3, 0, ?4)
            ",
        )
        .bind(notification.title)
        .bind(notification.message)
        .bind(notification.kind.as_str())
        .bind(notification.created_at)
        .execute(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(NotificationId::new(u64_from_i64(
            "id",
            res.last_insert_rowid(),
        )?))
    }

    async fn list_recent_notifications(
        &self,
        limit: u32,
    ) -> Result<Vec<Notification>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, title, message, kind, is_read, created_at
            FROM notifications
            ORDER BY created_at DESC, id DESC
            LIMIT ?1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut notifications = Vec::with_capacity(rows.len());
        for row in rows {
            notifications.push(map_notification_row(&row)?);
        }
        Ok(notifications)
    }

    async fn mark_notification_read(&self, id: NotificationId) -> Result<(), StorageError> {
        let res = sqlx::query("UPDATE notifications SET is_read = 1 WHERE id = ?1")
            .bind(i64_from_u64("id", id.value())?)
            .execute(self.pool())
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
