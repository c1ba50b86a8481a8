use std::sync::Arc;

use portal_core::model::{PrayerRequest, PrayerRequestId, Profile};
use storage::repository::{NewPrayerRequestRecord, PrayerRequestRepository};

use crate::Clock;
use crate::error::PrayerWallError;

/// Default number of requests fetched for the wall.
const WALL_LIMIT: u32 = 100;

/// Orchestrates the prayer wall.
#[derive(Clone)]
pub struct PrayerWallService {
    clock: Clock,
    prayers: Arc<dyn PrayerRequestRepository>,
}

impl PrayerWallService {
    #[must_use]
    pub fn new(clock: Clock, prayers: Arc<dyn PrayerRequestRepository>) -> Self {
        Self { clock, prayers }
    }

    /// The public wall: approved, non-private requests newest-first.
    ///
    /// # Errors
    ///
    /// Returns `PrayerWallError::Storage` if repository access fails.
    pub async fn wall(&self) -> Result<Vec<PrayerRequest>, PrayerWallError> {
        let requests = self.prayers.list_wall(WALL_LIMIT).await?;
        Ok(requests)
    }

    /// Submit a request for approval. Private requests are stored under the
    /// anonymous name and never reach the public wall.
    ///
    /// # Errors
    ///
    /// Returns `PrayerWallError::Prayer` for validation failures and
    /// `PrayerWallError::Storage` if persistence fails.
    pub async fn submit(
        &self,
        author: &Profile,
        content: &str,
        is_private: bool,
    ) -> Result<PrayerRequestId, PrayerWallError> {
        let now = self.clock.now();
        let request = PrayerRequest::new(
            PrayerRequestId::new(1),
            author.id().clone(),
            author.display_name(),
            content,
            is_private,
            false,
            now,
        )?;
        let id = self
            .prayers
            .insert_request(NewPrayerRequestRecord::from_request(&request))
            .await?;
        tracing::info!(request = %id, private = is_private, "prayer request submitted");
        Ok(id)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
