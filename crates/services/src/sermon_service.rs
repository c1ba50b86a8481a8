use std::sync::Arc;

use chrono::{DateTime, Utc};
use portal_core::model::{MediaUrl, Sermon, SermonId};
use storage::repository::{NewSermonRecord, SermonRepository};

use crate::Clock;
use crate::error::SermonServiceError;

/// Default number of sermons fetched for the library view.
const LIBRARY_LIMIT: u32 = 200;

/// Orchestrates the sermon library.
#[derive(Clone)]
pub struct SermonService {
    clock: Clock,
    sermons: Arc<dyn SermonRepository>,
}

impl SermonService {
    #[must_use]
    pub fn new(clock: Clock, sermons: Arc<dyn SermonRepository>) -> Self {
        Self { clock, sermons }
    }

    /// The library newest-first.
    ///
    /// # Errors
    ///
    /// Returns `SermonServiceError::Storage` if repository access fails.
    pub async fn library(&self) -> Result<Vec<Sermon>, SermonServiceError> {
        let sermons = self.sermons.list_recent_sermons(LIBRARY_LIMIT).await?;
        Ok(sermons)
    }

    /// Library entries whose title contains `term`, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `SermonServiceError::Storage` if repository access fails.
    pub async fn search(&self, term: &str) -> Result<Vec<Sermon>, SermonServiceError> {
        let sermons = self.sermons.list_recent_sermons(LIBRARY_LIMIT).await?;
        Ok(sermons
            .into_iter()
            .filter(|s| s.matches_title(term))
            .collect())
    }

    /// The most recent sermons for the home view.
    ///
    /// # Errors
    ///
    /// Returns `SermonServiceError::Storage` if repository access fails.
    pub async fn latest(&self, limit: u32) -> Result<Vec<Sermon>, SermonServiceError> {
        let sermons = self.sermons.list_recent_sermons(limit).await?;
        Ok(sermons)
    }

    /// Store a sermon whose media has already been uploaded elsewhere.
    ///
    /// # Errors
    ///
    /// Returns `SermonServiceError::Media` for invalid URLs,
    /// `SermonServiceError::Sermon` for validation failures, and
    /// `SermonServiceError::Storage` if persistence fails.
    #[allow(clippy::too_many_arguments)]
    pub async fn add_sermon(
        &self,
        title: &str,
        description: &str,
        preacher: &str,
        series: &str,
        preached_at: DateTime<Utc>,
        duration: &str,
        cover_url: Option<&str>,
        audio_url: Option<&str>,
    ) -> Result<SermonId, SermonServiceError> {
        let now = self.clock.now();
        let cover_url = cover_url.map(MediaUrl::parse).transpose()?;
        let audio_url = audio_url.map(MediaUrl::parse).transpose()?;
        let sermon = Sermon::new(
            SermonId::new(1),
            title,
            description,
            preacher,
            series,
            preached_at,
            duration,
            cover_url,
            audio_url,
            now,
        )?;
        let id = self
            .sermons
            .insert_sermon(NewSermonRecord::from_sermon(&sermon))
            .await?;
        tracing::info!(sermon = %id, title, "sermon added");
        Ok(id)
    }

    /// Remove a sermon from the library.
    ///
    /// # Errors
    ///
    /// Returns `SermonServiceError::Storage` if it does not exist or
    /// deletion fails.
    pub async fn delete_sermon(&self, id: SermonId) -> Result<(), SermonServiceError> {
        self.sermons.delete_sermon(id).await?;
        tracing::info!(sermon = %id, "sermon deleted");
        Ok(())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
