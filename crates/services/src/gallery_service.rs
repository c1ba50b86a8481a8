use std::sync::Arc;

use chrono::{DateTime, Utc};
use portal_core::model::{GalleryImage, GalleryImageId, MediaUrl, Profile};
use storage::repository::{GalleryRepository, NewGalleryImageRecord};

use crate::Clock;
use crate::error::GalleryServiceError;

/// Default number of images fetched for the album view.
const ALBUM_LIMIT: u32 = 200;

/// Orchestrates the photo gallery. Image bytes live in external object
/// storage; this service records and lists their URLs.
#[derive(Clone)]
pub struct GalleryService {
    clock: Clock,
    gallery: Arc<dyn GalleryRepository>,
}

impl GalleryService {
    #[must_use]
    pub fn new(clock: Clock, gallery: Arc<dyn GalleryRepository>) -> Self {
        Self { clock, gallery }
    }

    /// The album newest-first by the date the photo was taken.
    ///
    /// # Errors
    ///
    /// Returns `GalleryServiceError::Storage` if repository access fails.
    pub async fn album(&self) -> Result<Vec<GalleryImage>, GalleryServiceError> {
        let images = self.gallery.list_recent_images(ALBUM_LIMIT).await?;
        Ok(images)
    }

    /// Record an uploaded image in the gallery.
    ///
    /// # Errors
    ///
    /// Returns `GalleryServiceError::Media` for an invalid URL,
    /// `GalleryServiceError::Gallery` for validation failures, and
    /// `GalleryServiceError::Storage` if persistence fails.
    pub async fn add_image(
        &self,
        uploader: &Profile,
        url: &str,
        caption: &str,
        taken_at: Option<DateTime<Utc>>,
    ) -> Result<GalleryImageId, GalleryServiceError> {
        let url = MediaUrl::parse(url)?;
        let taken_at = taken_at.unwrap_or_else(|| self.clock.now());
        let image = GalleryImage::new(
            GalleryImageId::new(1),
            url,
            caption,
            taken_at,
            uploader.id().clone(),
        )?;
        let id = self
            .gallery
            .insert_image(NewGalleryImageRecord::from_image(&image))
            .await?;
        tracing::info!(image = %id, uploader = %uploader.id(), "gallery image added");
        Ok(id)
    }

    /// Remove an image record.
    ///
    /// # Errors
    ///
    /// Returns `GalleryServiceError::Storage` if it does not exist or
    /// deletion fails.
    pub async fn remove_image(&self, id: GalleryImageId) -> Result<(), GalleryServiceError> {
        self.gallery.delete_image(id).await?;
        tracing::info!(image = %id, "gallery image removed");
        Ok(())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::model::{MemberId, Role};
    use portal_core::time::{fixed_clock, fixed_now};
    use storage::repository::InMemoryRepository;

    fn profile() -> Profile {
        Profile::new(
            MemberId::new("uid-1"),
            "grace@example.org",
            "Grace",
            None,
            Role::Admin,
            None,
            None,
            None,
            fixed_now(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn add_and_remove_image() {
        let service = GalleryService::new(fixed_clock(), Arc::new(InMemoryRepository::new()));
        let id = service
            .add_image(
                &profile(),
                "https://cdn.example.org/gallery/harvest.jpg",
                "Harvest Sunday",
                None,
            )
            .await
            .unwrap();

        let album = service.album().await.unwrap();
        assert_eq!(album.len(), 1);
        assert_eq!(album[0].caption(), "Harvest Sunday");
        assert_eq!(album[0].taken_at(), fixed_now());

        service.remove_image(id).await.unwrap();
        assert!(service.album().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_image_rejects_invalid_url() {
        let service = GalleryService::new(fixed_clock(), Arc::new(InMemoryRepository::new()));
        let err = service
            .add_image(&profile(), "nope", "Caption", None)
            .await
            .unwrap_err();
        assert!(matches!(err, GalleryServiceError::Media(_)));
    }
}
