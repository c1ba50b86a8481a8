use std::sync::Arc;

use portal_core::model::{MemberId, Profile, Testimony, TestimonyId};
use storage::repository::{NewTestimonyRecord, TestimonyRepository};

use crate::Clock;
use crate::error::TestimonyServiceError;

/// Default number of testimonies fetched for the public feed.
const FEED_LIMIT: u32 = 100;

/// Orchestrates testimony submission and feeds.
#[derive(Clone)]
pub struct TestimonyService {
    clock: Clock,
    testimonies: Arc<dyn TestimonyRepository>,
}

impl TestimonyService {
    #[must_use]
    pub fn new(clock: Clock, testimonies: Arc<dyn TestimonyRepository>) -> Self {
        Self { clock, testimonies }
    }

    /// Approved testimonies newest-first.
    ///
    /// # Errors
    ///
    /// Returns `TestimonyServiceError::Storage` if repository access fails.
    pub async fn public_feed(&self) -> Result<Vec<Testimony>, TestimonyServiceError> {
        let testimonies = self.testimonies.list_approved(FEED_LIMIT).await?;
        Ok(testimonies)
    }

    /// Every testimony by the given member, approved or not.
    ///
    /// # Errors
    ///
    /// Returns `TestimonyServiceError::Storage` if repository access fails.
    pub async fn my_testimonies(
        &self,
        member: &MemberId,
    ) -> Result<Vec<Testimony>, TestimonyServiceError> {
        let testimonies = self.testimonies.list_by_author(member).await?;
        Ok(testimonies)
    }

    /// Submit a testimony for approval. It stays off the public feed until
    /// a moderator approves it.
    ///
    /// # Errors
    ///
    /// Returns `TestimonyServiceError::Testimony` for validation failures
    /// and `TestimonyServiceError::Storage` if persistence fails.
    pub async fn submit(
        &self,
        author: &Profile,
        content: &str,
    ) -> Result<TestimonyId, TestimonyServiceError> {
        let now = self.clock.now();
        let testimony = Testimony::new(
            TestimonyId::new(1),
            author.id().clone(),
            author.display_name(),
            content,
            false,
            now,
        )?;
        let id = self
            .testimonies
            .insert_testimony(NewTestimonyRecord::from_testimony(&testimony))
            .await?;
        tracing::info!(testimony = %id, author = %author.id(), "testimony submitted");
        Ok(id)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
