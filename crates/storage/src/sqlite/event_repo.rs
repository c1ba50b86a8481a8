use chrono::{DateTime, Utc};
use portal_core::model::{CalendarEvent, EventId};

use super::SqliteRepository;
use super::mapping::{i64_from_u64, map_event_row, u64_from_i64};
use crate::repository::{EventRepository, NewEventRecord, StorageError};

#[async_trait::async_trait]
impl EventRepository for SqliteRepository {
    async fn insert_event(&self, event: NewEventRecord) -> Result<EventId, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO events (title, description, starts_at, kind, created_by, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
        )
        .bind(event.title)
        .bind(event.description)
        .bind(event.starts_at)
        .bind(event.kind.as_str())
        .bind(event.created_by.as_str().to_owned())
        .bind(event.created_at)
        .execute(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(EventId::new(u64_from_i64("id", res.last_insert_rowid())?))
    }

    async fn list_calendar(&self, limit: u32) -> Result<Vec<CalendarEvent>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, title, description, starts_at, kind, created_by, created_at
            FROM events
            ORDER BY starts_at ASC, id ASC
            LIMIT ?1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut events = Vec::with_capacity(rows.len());
        for row in rows {
            events.push(map_event_row(&row)?);
        }
        Ok(events)
    }

    async fn list_upcoming(
        &self,
        after: DateTime<Utc>,
        limit: u32,
    ) -> Result<Vec<CalendarEvent>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, title, description, starts_at, kind, created_by, created_at
            FROM events
            WHERE starts_at >= ?1
            ORDER BY starts_at ASC, id ASC
            LIMIT ?2
            ",
        )
        .bind(after)
        .bind(i64::from(limit))
        .fetch_all(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut events = Vec::with_capacity(rows.len());
        for row in rows {
            events.push(map_event_row(&row)?);
        }
        Ok(events)
    }

    async fn delete_event(&self, id: EventId) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM events WHERE id = ?1")
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
