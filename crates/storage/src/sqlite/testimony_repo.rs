use portal_core::model::{MemberId, Testimony, TestimonyId};

use super::SqliteRepository;
use super::mapping::{i64_from_u64, map_testimony_row, ser, u64_from_i64};
use crate::repository::{NewTestimonyRecord, StorageError, TestimonyRepository};

#[async_trait::async_trait]
impl TestimonyRepository for SqliteRepository {
    async fn insert_testimony(
        &self,
        testimony: NewTestimonyRecord,
    ) -> Result<TestimonyId, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO testimonies (author_id, author_name, content, approved, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(testimony.author_id.as_str().to_owned())
        .bind(testimony.author_name)
        .bind(testimony.content)
        .bind(testimony.approved)
        .bind(testimony.created_at)
        .execute(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(TestimonyId::new(u64_from_i64(
            "id",
            res.last_insert_rowid(),
        )?))
    }

    async fn list_approved(&self, limit: u32) -> Result<Vec<Testimony>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, author_id, author_name, content, approved, created_at
            FROM testimonies
            WHERE approved = 1
            ORDER BY created_at DESC, id DESC
            LIMIT ?1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut testimonies = Vec::with_capacity(rows.len());
        for row in rows {
            testimonies.push(map_testimony_row(&row)?);
        }
        Ok(testimonies)
    }

    async fn list_by_author(&self, author: &MemberId) -> Result<Vec<Testimony>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, author_id, author_name, content, approved, created_at
            FROM testimonies
            WHERE author_id = ?1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(author.as_str())
        .fetch_all(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut testimonies = Vec::with_capacity(rows.len());
        for row in rows {
            testimonies.push(map_testimony_row(&row)?);
        }
        Ok(testimonies)
    }

    async fn list_pending(&self, limit: u32) -> Result<Vec<Testimony>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, author_id, author_name, content, approved, created_at
            FROM testimonies
            WHERE approved = 0
            ORDER BY created_at DESC, id DESC
            LIMIT ?1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut testimonies = Vec::with_capacity(rows.len());
        for row in rows {
            testimonies.push(map_testimony_row(&row)?);
        }
        Ok(testimonies)
    }

    async fn set_testimony_approved(&self, id: TestimonyId) -> Result<(), StorageError> {
        let res = sqlx::query("UPDATE testimonies SET approved = 1 WHERE id = ?1")
            .bind(i64_from_u64("id", id.value())?)
            .execute(self.pool())
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn delete_testimony(&self, id: TestimonyId) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM testimonies WHERE id = ?1")
            .bind(i64_from_u64("id", id.value())?)
            .execute(self.pool())
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn count_pending_testimonies(&self) -> Result<u64, StorageError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM testimonies WHERE approved = 0")
                .fetch_one(self.pool())
                .await
                .map_err(|e| StorageError::Connection(e.to_string()))?;
        u64::try_from(count).map_err(ser)
    }
}
