use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::content::MediaUrl;
use crate::model::ids::SermonId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SermonError {
    #[error("sermon title cannot be empty")]
    EmptyTitle,

    #[error("preacher name cannot be empty")]
    EmptyPreacher,
}

/// A sermon recording in the library.
///
/// Audio and cover art live in external object storage; only their URLs are
/// recorded here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sermon {
    id: SermonId,
    title: String,
    description: String,
    preacher: String,
    series: String,
    preached_at: DateTime<Utc>,
    duration: String,
    cover_url: Option<MediaUrl>,
    audio_url: Option<MediaUrl>,
    created_at: DateTime<Utc>,
}

impl Sermon {
    /// Creates a new sermon entry.
    ///
    /// # Errors
    ///
    /// Returns `SermonError` if title or preacher are empty after trimming.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: SermonId,
        title: impl Into<String>,
        description: impl Into<String>,
        preacher: impl Into<String>,
        series: impl Into<String>,
        preached_at: DateTime<Utc>,
        duration: impl Into<String>,
        cover_url: Option<MediaUrl>,
        audio_url: Option<MediaUrl>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, SermonError> {
        let title = title.into().trim().to_owned();
        if title.is_empty() {
            return Err(SermonError::EmptyTitle);
        }
        let preacher = preacher.into().trim().to_owned();
        if preacher.is_empty() {
            return Err(SermonError::EmptyPreacher);
        }

        Ok(Self {
            id,
            title,
            description: description.into().trim().to_owned(),
            preacher,
            series: series.into().trim().to_owned(),
            preached_at,
            duration: duration.into().trim().to_owned(),
            cover_url,
            audio_url,
            created_at,
        })
    }

    /// Case-insensitive title match used by the library search box.
    #[must_use]
    pub fn matches_title(&self, term: &str) -> bool {
        self.title.to_lowercase().contains(&term.to_lowercase())
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> SermonId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn preacher(&self) -> &str {
        &self.preacher
    }

    #[must_use]
    pub fn series(&self) -> &str {
        &self.series
    }

    #[must_use]
    pub fn preached_at(&self) -> DateTime<Utc> {
        self.preached_at
    }

    #[must_use]
    pub fn duration(&self) -> &str {
        &self.duration
    }

    #[must_use]
    pub fn cover_url(&self) -> Option<&MediaUrl> {
        self.cover_url.as_ref()
    }

    #[must_use]
    pub fn audio_url(&self) -> Option<&MediaUrl> {
        self.audio_url.as_ref()
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
