use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::directory_service::DirectoryService;
use crate::error::AppServicesError;
use crate::event_service::EventService;
use crate::gallery_service::GalleryService;
use crate::moderation_service::ModerationService;
use crate::notification_service::NotificationService;
use crate::prayer_service::PrayerWallService;
use crate::quizzes::{QuizGeneratorService, QuizLibraryService};
use crate::sermon_service::SermonService;
use crate::testimony_service::TestimonyService;

/// Deployment-level settings that do not belong to any one service.
#[derive(Debug, Clone, Default)]
pub struct PortalConfig {
    /// Email granted the admin role on first sign-in.
    pub bootstrap_admin_email: Option<String>,
}

/// Assembles the portal-facing services over one shared `Storage`.
#[derive(Clone)]
pub struct AppServices {
    directory: Arc<DirectoryService>,
    sermons: Arc<SermonService>,
    testimonies: Arc<TestimonyService>,
    prayer_wall: Arc<PrayerWallService>,
    events: Arc<EventService>,
    gallery: Arc<GalleryService>,
    notifications: Arc<NotificationService>,
    quiz_library: Arc<QuizLibraryService>,
    quiz_generator: Arc<QuizGeneratorService>,
    moderation: Arc<ModerationService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        config: PortalConfig,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::with_storage(storage, clock, config))
    }

    /// Build services over an already-initialized `Storage` (used by tests
    /// with the in-memory adapter).
    #[must_use]
    pub fn with_storage(storage: Storage, clock: Clock, config: PortalConfig) -> Self {
        let mut directory = DirectoryService::new(clock, Arc::clone(&storage.members));
        if let Some(email) = config.bootstrap_admin_email {
            directory = directory.with_bootstrap_admin(email);
        }

        let moderation = ModerationService::new(
            clock,
            Arc::clone(&storage.members),
            Arc::clone(&storage.sermons),
            Arc::clone(&storage.testimonies),
            Arc::clone(&storage.prayers),
            Arc::clone(&storage.notifications),
        );

        Self {
            directory: Arc::new(directory),
            sermons: Arc::new(SermonService::new(clock, Arc::clone(&storage.sermons))),
            testimonies: Arc::new(TestimonyService::new(
                clock,
                Arc::clone(&storage.testimonies),
            )),
            prayer_wall: Arc::new(PrayerWallService::new(clock, Arc::clone(&storage.prayers))),
            events: Arc::new(EventService::new(clock, Arc::clone(&storage.events))),
            gallery: Arc::new(GalleryService::new(clock, Arc::clone(&storage.gallery))),
            notifications: Arc::new(NotificationService::new(
                clock,
                Arc::clone(&storage.notifications),
            )),
            quiz_library: Arc::new(QuizLibraryService::new(
                clock,
                Arc::clone(&storage.quizzes),
            )),
            quiz_generator: Arc::new(QuizGeneratorService::from_env()),
            moderation: Arc::new(moderation),
        }
    }

    #[must_use]
    pub fn directory(&self) -> Arc<DirectoryService> {
        Arc::clone(&self.directory)
    }

    #[must_use]
    pub fn sermons(&self) -> Arc<SermonService> {
        Arc::clone(&self.sermons)
    }

    #[must_use]
    pub fn testimonies(&self) -> Arc<TestimonyService> {
        Arc::clone(&self.testimonies)
    }

    #[must_use]
    pub fn prayer_wall(&self) -> Arc<PrayerWallService> {
        Arc::clone(&self.prayer_wall)
    }

    #[must_use]
    pub fn events(&self) -> Arc<EventService> {
        Arc::clone(&self.events)
    }

    #[must_use]
    pub fn gallery(&self) -> Arc<GalleryService> {
        Arc::clone(&self.gallery)
    }

    #[must_use]
    pub fn notifications(&self) -> Arc<NotificationService> {
        Arc::clone(&self.notifications)
    }

    #[must_use]
    pub fn quiz_library(&self) -> Arc<QuizLibraryService> {
        Arc::clone(&self.quiz_library)
    }

    #[must_use]
    pub fn quiz_generator(&self) -> Arc<QuizGeneratorService> {
        Arc::clone(&self.quiz_generator)
    }

    #[must_use]
    pub fn moderation(&self) -> Arc<ModerationService> {
        Arc::clone(&self.moderation)
    }
}
