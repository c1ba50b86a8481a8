use portal_core::model::{Sermon, SermonId};

use super::SqliteRepository;
use super::mapping::{map_sermon_row, ser, u64_from_i64};
use crate::repository::{NewSermonRecord, SermonRepository, StorageError};

#[async_trait::async_trait]
impl SermonRepository for SqliteRepository {
    async fn insert_sermon(&self, sermon: NewSermonRecord) -> Result<SermonId, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO sermons (title, description, preacher, series, preached_at, duration, cover_url, audio_url, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ",
        )
        .bind(sermon.title)
        .bind(sermon.description)
        .bind(sermon.preacher)
        .bind(sermon.series)
        .bind(sermon.preached_at)
        .bind(sermon.duration)
        .bind(sermon.cover_url)
        .bind(sermon.audio_url)
        .bind(sermon.created_at)
        .execute(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(SermonId::new(u64_from_i64("id", res.last_insert_rowid())?))
    }

    async fn list_recent_sermons(&self, limit: u32) -> Result<Vec<Sermon>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, title, description, preacher, series, preached_at, duration, cover_url, audio_url, created_at
            FROM sermons
            ORDER BY preached_at DESC, id DESC
            LIMIT ?1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut sermons = Vec::with_capacity(rows.len());
        for row in rows {
            sermons.push(map_sermon_row(&row)?);
        }
        Ok(sermons)
    }

    async fn delete_sermon(&self, id: SermonId) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM sermons WHERE id = ?1")
            .bind(super::mapping::i64_from_u64("id", id.value())?)
            .execute(self.pool())
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn count_sermons(&self) -> Result<u64, StorageError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sermons")
            .fetch_one(self.pool())
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        u64::try_from(count).map_err(ser)
    }
}
