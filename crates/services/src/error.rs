//! Shared error types for the services crate.

use thiserror::Error;

use portal_core::model::{
    EventError, GalleryError, MediaUrlError, NotificationError, PrayerError, ProfileError,
    QuizError, QuizSessionError, SermonError, TestimonyError,
};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `SermonService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SermonServiceError {
    #[error(transparent)]
    Sermon(#[from] SermonError),
    #[error(transparent)]
    Media(#[from] MediaUrlError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `TestimonyService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TestimonyServiceError {
    #[error(transparent)]
    Testimony(#[from] TestimonyError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `PrayerWallService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PrayerWallError {
    #[error(transparent)]
    Prayer(#[from] PrayerError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `EventService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EventServiceError {
    #[error(transparent)]
    Event(#[from] EventError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `GalleryService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GalleryServiceError {
    #[error(transparent)]
    Gallery(#[from] GalleryError),
    #[error(transparent)]
    Media(#[from] MediaUrlError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `NotificationService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NotificationServiceError {
    #[error(transparent)]
    Notification(#[from] NotificationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `DirectoryService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DirectoryError {
    #[error("no profile for member {0}")]
    UnknownMember(String),
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Media(#[from] MediaUrlError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `QuizLibraryService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizLibraryError {
    #[error("quiz {0} not found")]
    UnknownQuiz(u64),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Session(#[from] QuizSessionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `QuizGeneratorService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizGenError {
    #[error("quiz generation is not configured")]
    Disabled,
    #[error("quiz generator returned an empty response")]
    EmptyResponse,
    #[error("quiz generator request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("quiz generator returned malformed JSON: {0}")]
    MalformedPayload(#[from] serde_json::Error),
    #[error(transparent)]
    Quiz(#[from] QuizError),
}

/// Errors emitted by `ModerationService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ModerationError {
    #[error("member {0} is not an admin")]
    NotAuthorized(String),
    #[error(transparent)]
    Notification(#[from] NotificationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
