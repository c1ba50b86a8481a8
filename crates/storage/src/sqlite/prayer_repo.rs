use portal_core::model::{PrayerRequest, PrayerRequestId};

use super::SqliteRepository;
use super::mapping::{i64_from_u64, map_prayer_row, ser, u64_from_i64};
use crate::repository::{NewPrayerRequestRecord, PrayerRequestRepository, StorageError};

#[async_trait::async_trait]
impl PrayerRequestRepository for SqliteRepository {
    async fn insert_request(
        &self,
        request: NewPrayerRequestRecord,
    ) -> Result<PrayerRequestId, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO prayer_requests (author_id, author_name, content, is_private, approved, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
        )
        .bind(request.author_id.as_str().to_owned())
        .bind(request.author_name)
        .bind(request.content)
        .bind(request.is_private)
        .bind(request.approved)
        .bind(request.created_at)
        .execute(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(PrayerRequestId::new(u64_from_i64(
            "id",
            res.last_insert_rowid(),
        )?))
    }

    async fn list_wall(&self, limit: u32) -> Result<Vec<PrayerRequest>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, author_id, author_name, content, is_private, approved, created_at
            FROM prayer_requests
            WHERE approved = 1 AND is_private = 0
            ORDER BY created_at DESC, id DESC
            LIMIT ?1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut requests = Vec::with_capacity(rows.len());
        for row in rows {
            requests.push(map_prayer_row(&row)?);
        }
        Ok(requests)
    }

    async fn list_pending_requests(
        &self,
        limit: u32,
    ) -> Result<Vec<PrayerRequest>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, author_id, author_name, content, is_private, approved, created_at
            FROM prayer_requests
            WHERE approved = 0
            ORDER BY created_at DESC, id DESC
            LIMIT ?1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut requests = Vec::with_capacity(rows.len());
        for row in rows {
            requests.push(map_prayer_row(&row)?);
        }
        Ok(requests)
    }

    async fn set_request_approved(&self, id: PrayerRequestId) -> Result<(), StorageError> {
        let res = sqlx::query("UPDATE prayer_requests SET approved = 1 WHERE id = ?1")
            .bind(i64_from_u64("id", id.value())?)
            .execute(self.pool())
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn delete_request(&self, id: PrayerRequestId) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM prayer_requests WHERE id = ?1")
            .bind(i64_from_u64("id", id.value())?)
            .execute(self.pool())
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn count_requests(&self) -> Result<u64, StorageError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM prayer_requests")
            .fetch_one(self.pool())
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        u64::try_from(count).map_err(ser)
    }
}
