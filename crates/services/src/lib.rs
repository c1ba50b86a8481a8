#![forbid(unsafe_code)]

pub mod app_services;
pub mod directory_service;
pub mod error;
pub mod event_service;
pub mod gallery_service;
pub mod moderation_service;
pub mod notification_service;
pub mod prayer_service;
pub mod quizzes;
pub mod sermon_service;
pub mod testimony_service;

pub use portal_core::Clock;

pub use app_services::{AppServices, PortalConfig};
pub use directory_service::DirectoryService;
pub use error::{
    AppServicesError, DirectoryError, EventServiceError, GalleryServiceError, ModerationError,
    NotificationServiceError, PrayerWallError, QuizGenError, QuizLibraryError,
    SermonServiceError, TestimonyServiceError,
};
pub use event_service::EventService;
pub use gallery_service::GalleryService;
pub use moderation_service::{ModerationService, OverviewStats};
pub use notification_service::NotificationService;
pub use prayer_service::PrayerWallService;
pub use quizzes::{
    GeneratedQuizDraft, GeneratorConfig, LibraryStats, QuizGeneratorService, QuizLibraryService,
    QuizListItem,
};
pub use sermon_service::SermonService;
pub use testimony_service::TestimonyService;
