use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::content::MediaUrl;
use crate::model::ids::{GalleryImageId, MemberId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GalleryError {
    #[error("caption cannot be empty")]
    EmptyCaption,
}

/// A photo in the community gallery. The image itself lives in external
/// object storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryImage {
    id: GalleryImageId,
    url: MediaUrl,
    caption: String,
    taken_at: DateTime<Utc>,
    uploaded_by: MemberId,
}

impl GalleryImage {
    /// Creates a new gallery entry.
    ///
    /// # Errors
    ///
    /// Returns `GalleryError::EmptyCaption` if the caption is empty after
    /// trimming.
    pub fn new(
        id: GalleryImageId,
        url: MediaUrl,
        caption: impl Into<String>,
        taken_at: DateTime<Utc>,
        uploaded_by: MemberId,
    ) -> Result<Self, GalleryError> {
        let caption = caption.into().trim().to_owned();
        if caption.is_empty() {
            return Err(GalleryError::EmptyCaption);
        }

        Ok(Self {
            id,
            url,
            caption,
            taken_at,
            uploaded_by,
        })
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> GalleryImageId {
        self.id
    }

    #[must_use]
    pub fn url(&self) -> &MediaUrl {
        &self.url
    }

    #[must_use]
    pub fn caption(&self) -> &str {
        &self.caption
    }

    #[must_use]
    pub fn taken_at(&self) -> DateTime<Utc> {
        self.taken_at
    }

    #[must_use]
    pub fn uploaded_by(&self) -> &MemberId {
        &self.uploaded_by
    }
}
