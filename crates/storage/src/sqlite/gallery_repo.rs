use portal_core::model::{GalleryImage, GalleryImageId};

use super::SqliteRepository;
use super::mapping::{i64_from_u64, map_image_row, u64_from_i64};
use crate::repository::{GalleryRepository, NewGalleryImageRecord, StorageError};

#[async_trait::async_trait]
impl GalleryRepository for SqliteRepository {
    async fn insert_image(
        &self,
        image: NewGalleryImageRecord,
    ) -> Result<GalleryImageId, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO gallery_images (url, caption, taken_at, uploaded_by)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(image.url)
        .bind(image.caption)
        .bind(image.taken_at)
        .bind(image.uploaded_by.as_str().to_owned())
        .execute(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(GalleryImageId::new(u64_from_i64(
            "id",
            res.last_insert_rowid(),
        )?))
    }

    async fn list_recent_images(&self, limit: u32) -> Result<Vec<GalleryImage>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, url, caption, taken_at, uploaded_by
            FROM gallery_images
            ORDER BY taken_at DESC, id DESC
            LIMIT ?1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut images = Vec::with_capacity(rows.len());
        for row in rows {
            images.push(map_image_row(&row)?);
        }
        Ok(images)
    }

    async fn delete_image(&self, id: GalleryImageId) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM gallery_images WHERE id = ?1")
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
