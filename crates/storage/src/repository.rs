use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use portal_core::model::{
    CalendarEvent, EventId, EventKind, GalleryImage, GalleryImageId, MediaUrl, MemberId,
    Notification, NotificationId, NotificationKind, PrayerRequest, PrayerRequestId, Profile,
    Quiz, QuizId, QuizQuestion, Role, Sermon, SermonId, Testimony, TestimonyId,
};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

//
// ─── RECORDS ───────────────────────────────────────────────────────────────────
//

/// Persisted shape for a sermon awaiting an id.
///
/// Records mirror the domain types with plain fields so repositories can
/// serialize without leaking storage concerns into the domain layer; the
/// conversions back re-validate through the domain constructors.
#[derive(Debug, Clone)]
pub struct NewSermonRecord {
    pub title: String,
    pub description: String,
    pub preacher: String,
    pub series: String,
    pub preached_at: DateTime<Utc>,
    pub duration: String,
    pub cover_url: Option<String>,
    pub audio_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewSermonRecord {
    #[must_use]
    pub fn from_sermon(sermon: &Sermon) -> Self {
        Self {
            title: sermon.title().to_owned(),
            description: sermon.description().to_owned(),
            preacher: sermon.preacher().to_owned(),
            series: sermon.series().to_owned(),
            preached_at: sermon.preached_at(),
            duration: sermon.duration().to_owned(),
            cover_url: sermon.cover_url().map(|u| u.as_str().to_owned()),
            audio_url: sermon.audio_url().map(|u| u.as_str().to_owned()),
            created_at: sermon.created_at(),
        }
    }

    /// Rebuild the domain sermon under its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if any field no longer
    /// validates.
    pub fn into_sermon(self, id: SermonId) -> Result<Sermon, StorageError> {
        let cover_url = self
            .cover_url
            .as_deref()
            .map(MediaUrl::parse)
            .transpose()
            .map_err(ser)?;
        let audio_url = self
            .audio_url
            .as_deref()
            .map(MediaUrl::parse)
            .transpose()
            .map_err(ser)?;
        Sermon::new(
            id,
            self.title,
            self.description,
            self.preacher,
            self.series,
            self.preached_at,
            self.duration,
            cover_url,
            audio_url,
            self.created_at,
        )
        .map_err(ser)
    }
}

#[derive(Debug, Clone)]
pub struct NewTestimonyRecord {
    pub author_id: MemberId,
    pub author_name: String,
    pub content: String,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

impl NewTestimonyRecord {
    #[must_use]
    pub fn from_testimony(testimony: &Testimony) -> Self {
        Self {
            author_id: testimony.author_id().clone(),
            author_name: testimony.author_name().to_owned(),
            content: testimony.content().to_owned(),
            approved: testimony.is_approved(),
            created_at: testimony.created_at(),
        }
    }

    /// Rebuild the domain testimony under its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if validation fails.
    pub fn into_testimony(self, id: TestimonyId) -> Result<Testimony, StorageError> {
        Testimony::new(
            id,
            self.author_id,
            self.author_name,
            self.content,
            self.approved,
            self.created_at,
        )
        .map_err(ser)
    }
}

#[derive(Debug, Clone)]
pub struct NewPrayerRequestRecord {
    pub author_id: MemberId,
    pub author_name: String,
    pub content: String,
    pub is_private: bool,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

impl NewPrayerRequestRecord {
    #[must_use]
    pub fn from_request(request: &PrayerRequest) -> Self {
        Self {
            author_id: request.author_id().clone(),
            author_name: request.author_name().to_owned(),
            content: request.content().to_owned(),
            is_private: request.is_private(),
            approved: request.is_approved(),
            created_at: request.created_at(),
        }
    }

    /// Rebuild the domain request under its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if validation fails.
    pub fn into_request(self, id: PrayerRequestId) -> Result<PrayerRequest, StorageError> {
        PrayerRequest::new(
            id,
            self.author_id,
            self.author_name,
            self.content,
            self.is_private,
            self.approved,
            self.created_at,
        )
        .map_err(ser)
    }
}

#[derive(Debug, Clone)]
pub struct NewEventRecord {
    pub title: String,
    pub description: String,
    pub starts_at: DateTime<Utc>,
    pub kind: EventKind,
    pub created_by: MemberId,
    pub created_at: DateTime<Utc>,
}

impl NewEventRecord {
    #[must_use]
    pub fn from_event(event: &CalendarEvent) -> Self {
        Self {
            title: event.title().to_owned(),
            description: event.description().to_owned(),
            starts_at: event.starts_at(),
            kind: event.kind(),
            created_by: event.created_by().clone(),
            created_at: event.created_at(),
        }
    }

    /// Rebuild the domain event under its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if validation fails.
    pub fn into_event(self, id: EventId) -> Result<CalendarEvent, StorageError> {
        CalendarEvent::new(
            id,
            self.title,
            self.description,
            self.starts_at,
            self.kind,
            self.created_by,
            self.created_at,
        )
        .map_err(ser)
    }
}

/// Question shape stored in the quiz document column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub text: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

impl QuestionRecord {
    #[must_use]
    pub fn from_question(question: &QuizQuestion) -> Self {
        Self {
            text: question.text().to_owned(),
            options: question.options().to_vec(),
            correct_index: question.correct_index(),
        }
    }

    /// Rebuild a validated question.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` for a malformed stored shape.
    pub fn into_question(self) -> Result<QuizQuestion, StorageError> {
        QuizQuestion::new(self.text, self.options, self.correct_index).map_err(ser)
    }
}

#[derive(Debug, Clone)]
pub struct NewQuizRecord {
    pub topic: String,
    pub difficulty: String,
    pub questions: Vec<QuestionRecord>,
    pub created_at: DateTime<Utc>,
}

impl NewQuizRecord {
    #[must_use]
    pub fn from_quiz(quiz: &Quiz) -> Self {
        Self {
            topic: quiz.topic().to_owned(),
            difficulty: quiz.difficulty().as_str().to_owned(),
            questions: quiz
                .questions()
                .iter()
                .map(QuestionRecord::from_question)
                .collect(),
            created_at: quiz.created_at(),
        }
    }

    /// Rebuild the domain quiz under its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if any question or the
    /// difficulty no longer validates.
    pub fn into_quiz(self, id: QuizId) -> Result<Quiz, StorageError> {
        let difficulty =
            portal_core::model::Difficulty::parse(&self.difficulty).map_err(ser)?;
        let mut questions = Vec::with_capacity(self.questions.len());
        for record in self.questions {
            questions.push(record.into_question()?);
        }
        Quiz::new(id, self.topic, difficulty, questions, self.created_at).map_err(ser)
    }
}

#[derive(Debug, Clone)]
pub struct NewGalleryImageRecord {
    pub url: String,
    pub caption: String,
    pub taken_at: DateTime<Utc>,
    pub uploaded_by: MemberId,
}

impl NewGalleryImageRecord {
    #[must_use]
    pub fn from_image(image: &GalleryImage) -> Self {
        Self {
            url: image.url().as_str().to_owned(),
            caption: image.caption().to_owned(),
            taken_at: image.taken_at(),
            uploaded_by: image.uploaded_by().clone(),
        }
    }

    /// Rebuild the domain image under its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if validation fails.
    pub fn into_image(self, id: GalleryImageId) -> Result<GalleryImage, StorageError> {
        let url = MediaUrl::parse(&self.url).map_err(ser)?;
        GalleryImage::new(id, url, self.caption, self.taken_at, self.uploaded_by).map_err(ser)
    }
}

#[derive(Debug, Clone)]
pub struct NewNotificationRecord {
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub created_at: DateTime<Utc>,
}

impl NewNotificationRecord {
    /// Rebuild the domain notification under its assigned id. New
    /// notifications always start unread.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if validation fails.
    pub fn into_notification(self, id: NotificationId) -> Result<Notification, StorageError> {
        Notification::new(id, self.title, self.message, self.kind, false, self.created_at)
            .map_err(ser)
    }
}

//
// ─── REPOSITORY CONTRACTS ──────────────────────────────────────────────────────
//

/// Repository contract for member profiles.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Persist or update a profile.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the profile cannot be stored.
    async fn upsert_profile(&self, profile: &Profile) -> Result<(), StorageError>;

    /// Fetch a profile by member id. `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for storage failures.
    async fn get_profile(&self, id: &MemberId) -> Result<Option<Profile>, StorageError>;

    /// List profiles ordered by creation time, up to `limit`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for storage failures.
    async fn list_profiles(&self, limit: u32) -> Result<Vec<Profile>, StorageError>;

    /// Overwrite the stored role for a member.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the profile does not exist.
    async fn set_role(&self, id: &MemberId, role: Role) -> Result<(), StorageError>;

    /// Total number of profiles.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for storage failures.
    async fn count_profiles(&self) -> Result<u64, StorageError>;
}

/// Repository contract for the sermon library.
#[async_trait]
pub trait SermonRepository: Send + Sync {
    /// Insert a sermon and return its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the sermon cannot be stored.
    async fn insert_sermon(&self, sermon: NewSermonRecord) -> Result<SermonId, StorageError>;

    /// Sermons newest-first by preached-at date, up to `limit`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for storage failures.
    async fn list_recent_sermons(&self, limit: u32) -> Result<Vec<Sermon>, StorageError>;

    /// Delete a sermon.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if it does not exist.
    async fn delete_sermon(&self, id: SermonId) -> Result<(), StorageError>;

    /// Total number of sermons.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for storage failures.
    async fn count_sermons(&self) -> Result<u64, StorageError>;
}

/// Repository contract for testimonies.
#[async_trait]
pub trait TestimonyRepository: Send + Sync {
    /// Insert a testimony and return its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the testimony cannot be stored.
    async fn insert_testimony(
        &self,
        testimony: NewTestimonyRecord,
    ) -> Result<TestimonyId, StorageError>;

    /// Approved testimonies newest-first, up to `limit`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for storage failures.
    async fn list_approved(&self, limit: u32) -> Result<Vec<Testimony>, StorageError>;

    /// All testimonies by one author, newest-first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for storage failures.
    async fn list_by_author(&self, author: &MemberId) -> Result<Vec<Testimony>, StorageError>;

    /// Unapproved testimonies newest-first, up to `limit`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for storage failures.
    async fn list_pending(&self, limit: u32) -> Result<Vec<Testimony>, StorageError>;

    /// Flag a testimony approved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if it does not exist.
    async fn set_testimony_approved(&self, id: TestimonyId) -> Result<(), StorageError>;

    /// Delete a testimony.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if it does not exist.
    async fn delete_testimony(&self, id: TestimonyId) -> Result<(), StorageError>;

    /// Number of testimonies awaiting approval.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for storage failures.
    async fn count_pending_testimonies(&self) -> Result<u64, StorageError>;
}

/// Repository contract for the prayer wall.
#[async_trait]
pub trait PrayerRequestRepository: Send + Sync {
    /// Insert a prayer request and return its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the request cannot be stored.
    async fn insert_request(
        &self,
        request: NewPrayerRequestRecord,
    ) -> Result<PrayerRequestId, StorageError>;

    /// Approved, public requests newest-first, up to `limit`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for storage failures.
    async fn list_wall(&self, limit: u32) -> Result<Vec<PrayerRequest>, StorageError>;

    /// Unapproved requests newest-first, up to `limit`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for storage failures.
    async fn list_pending_requests(&self, limit: u32)
    -> Result<Vec<PrayerRequest>, StorageError>;

    /// Flag a request approved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if it does not exist.
    async fn set_request_approved(&self, id: PrayerRequestId) -> Result<(), StorageError>;

    /// Delete a request.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if it does not exist.
    async fn delete_request(&self, id: PrayerRequestId) -> Result<(), StorageError>;

    /// Total number of requests, private ones included.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for storage failures.
    async fn count_requests(&self) -> Result<u64, StorageError>;
}

/// Repository contract for the events calendar.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Insert an event and return its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the event cannot be stored.
    async fn insert_event(&self, event: NewEventRecord) -> Result<EventId, StorageError>;

    /// Events soonest-first, up to `limit`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for storage failures.
    async fn list_calendar(&self, limit: u32) -> Result<Vec<CalendarEvent>, StorageError>;

    /// Events starting at or after `after`, soonest-first, up to `limit`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for storage failures.
    async fn list_upcoming(
        &self,
        after: DateTime<Utc>,
        limit: u32,
    ) -> Result<Vec<CalendarEvent>, StorageError>;

    /// Delete an event.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if it does not exist.
    async fn delete_event(&self, id: EventId) -> Result<(), StorageError>;
}

/// Repository contract for the quiz library.
#[async_trait]
pub trait QuizRepository: Send + Sync {
    /// Insert a quiz and return its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the quiz cannot be stored.
    async fn insert_quiz(&self, quiz: NewQuizRecord) -> Result<QuizId, StorageError>;

    /// Quizzes newest-first, up to `limit`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for storage failures.
    async fn list_recent_quizzes(&self, limit: u32) -> Result<Vec<Quiz>, StorageError>;

    /// Fetch a quiz by id. `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for storage failures.
    async fn get_quiz(&self, id: QuizId) -> Result<Option<Quiz>, StorageError>;

    /// Delete a quiz.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if it does not exist.
    async fn delete_quiz(&self, id: QuizId) -> Result<(), StorageError>;
}

/// Repository contract for the photo gallery.
#[async_trait]
pub trait GalleryRepository: Send + Sync {
    /// Insert an image record and return its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the image cannot be stored.
    async fn insert_image(
        &self,
        image: NewGalleryImageRecord,
    ) -> Result<GalleryImageId, StorageError>;

    /// Images newest-first by taken-at date, up to `limit`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for storage failures.
    async fn list_recent_images(&self, limit: u32) -> Result<Vec<GalleryImage>, StorageError>;

    /// Delete an image record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if it does not exist.
    async fn delete_image(&self, id: GalleryImageId) -> Result<(), StorageError>;
}

/// Repository contract for the notification feed.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Append a notification and return its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the notification cannot be stored.
    async fn append_notification(
        &self,
        notification: NewNotificationRecord,
    ) -> Result<NotificationId, StorageError>;

    /// Notifications newest-first, up to `limit`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for storage failures.
    async fn list_recent_notifications(
        &self,
        limit: u32,
    ) -> Result<Vec<Notification>, StorageError>;

    /// Flag a notification read.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if it does not exist.
    async fn mark_notification_read(&self, id: NotificationId) -> Result<(), StorageError>;
}

//
// ─── STORAGE AGGREGATE ─────────────────────────────────────────────────────────
//

/// Bundle of every repository the services layer needs.
#[derive(Clone)]
pub struct Storage {
    pub members: Arc<dyn MemberRepository>,
    pub sermons: Arc<dyn SermonRepository>,
    pub testimonies: Arc<dyn TestimonyRepository>,
    pub prayers: Arc<dyn PrayerRequestRepository>,
    pub events: Arc<dyn EventRepository>,
    pub quizzes: Arc<dyn QuizRepository>,
    pub gallery: Arc<dyn GalleryRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
}

impl Storage {
    /// Build a `Storage` where one adapter implements every contract.
    pub fn from_single<R>(repo: R) -> Self
    where
        R: MemberRepository
            + SermonRepository
            + TestimonyRepository
            + PrayerRequestRepository
            + EventRepository
            + QuizRepository
            + GalleryRepository
            + NotificationRepository
            + Clone
            + 'static,
    {
        Self {
            members: Arc::new(repo.clone()),
            sermons: Arc::new(repo.clone()),
            testimonies: Arc::new(repo.clone()),
            prayers: Arc::new(repo.clone()),
            events: Arc::new(repo.clone()),
            quizzes: Arc::new(repo.clone()),
            gallery: Arc::new(repo.clone()),
            notifications: Arc::new(repo),
        }
    }
}

//
// ─── IN-MEMORY ADAPTER ─────────────────────────────────────────────────────────
//

#[derive(Default)]
struct MemoryState {
    next_id: u64,
    profiles: HashMap<MemberId, Profile>,
    sermons: HashMap<SermonId, Sermon>,
    testimonies: HashMap<TestimonyId, Testimony>,
    prayers: HashMap<PrayerRequestId, PrayerRequest>,
    events: HashMap<EventId, CalendarEvent>,
    quizzes: HashMap<QuizId, Quiz>,
    gallery: HashMap<GalleryImageId, GalleryImage>,
    notifications: HashMap<NotificationId, Notification>,
}

impl MemoryState {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, MemoryState>, StorageError> {
        self.state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

fn truncated<T>(mut items: Vec<T>, limit: u32) -> Vec<T> {
    items.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
    items
}

#[async_trait]
impl MemberRepository for InMemoryRepository {
    async fn upsert_profile(&self, profile: &Profile) -> Result<(), StorageError> {
        let mut state = self.lock()?;
        state.profiles.insert(profile.id().clone(), profile.clone());
        Ok(())
    }

    async fn get_profile(&self, id: &MemberId) -> Result<Option<Profile>, StorageError> {
        let state = self.lock()?;
        Ok(state.profiles.get(id).cloned())
    }

    async fn list_profiles(&self, limit: u32) -> Result<Vec<Profile>, StorageError> {
        let state = self.lock()?;
        let mut profiles: Vec<_> = state.profiles.values().cloned().collect();
        profiles.sort_by_key(|p| (p.created_at(), p.id().clone()));
        Ok(truncated(profiles, limit))
    }

    async fn set_role(&self, id: &MemberId, role: Role) -> Result<(), StorageError> {
        let mut state = self.lock()?;
        let profile = state.profiles.get_mut(id).ok_or(StorageError::NotFound)?;
        *profile = profile.clone().with_role(role);
        Ok(())
    }

    async fn count_profiles(&self) -> Result<u64, StorageError> {
        let state = self.lock()?;
        Ok(state.profiles.len() as u64)
    }
}

#[async_trait]
impl SermonRepository for InMemoryRepository {
    async fn insert_sermon(&self, sermon: NewSermonRecord) -> Result<SermonId, StorageError> {
        let mut state = self.lock()?;
        let id = SermonId::new(state.next_id());
        let sermon = sermon.into_sermon(id)?;
        state.sermons.insert(id, sermon);
        Ok(id)
    }

    async fn list_recent_sermons(&self, limit: u32) -> Result<Vec<Sermon>, StorageError> {
        let state = self.lock()?;
        let mut sermons: Vec<_> = state.sermons.values().cloned().collect();
        sermons.sort_by_key(|s| std::cmp::Reverse((s.preached_at(), s.id().value())));
        Ok(truncated(sermons, limit))
    }

    async fn delete_sermon(&self, id: SermonId) -> Result<(), StorageError> {
        let mut state = self.lock()?;
        state
            .sermons
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::NotFound)
    }

    async fn count_sermons(&self) -> Result<u64, StorageError> {
        let state = self.lock()?;
        Ok(state.sermons.len() as u64)
    }
}

#[async_trait]
impl TestimonyRepository for InMemoryRepository {
    async fn insert_testimony(
        &self,
        testimony: NewTestimonyRecord,
    ) -> Result<TestimonyId, StorageError> {
        let mut state = self.lock()?;
        let id = TestimonyId::new(state.next_id());
        let testimony = testimony.into_testimony(id)?;
        state.testimonies.insert(id, testimony);
        Ok(id)
    }

    async fn list_approved(&self, limit: u32) -> Result<Vec<Testimony>, StorageError> {
        let state = self.lock()?;
        let mut testimonies: Vec<_> = state
            .testimonies
            .values()
            .filter(|t| t.is_approved())
            .cloned()
            .collect();
        testimonies.sort_by_key(|t| std::cmp::Reverse((t.created_at(), t.id().value())));
        Ok(truncated(testimonies, limit))
    }

    async fn list_by_author(&self, author: &MemberId) -> Result<Vec<Testimony>, StorageError> {
        let state = self.lock()?;
        let mut testimonies: Vec<_> = state
            .testimonies
            .values()
            .filter(|t| t.author_id() == author)
            .cloned()
            .collect();
        testimonies.sort_by_key(|t| std::cmp::Reverse((t.created_at(), t.id().value())));
        Ok(testimonies)
    }

    async fn list_pending(&self, limit: u32) -> Result<Vec<Testimony>, StorageError> {
        let state = self.lock()?;
        let mut testimonies: Vec<_> = state
            .testimonies
            .values()
            .filter(|t| !t.is_approved())
            .cloned()
            .collect();
        testimonies.sort_by_key(|t| std::cmp::Reverse((t.created_at(), t.id().value())));
        Ok(truncated(testimonies, limit))
    }

    async fn set_testimony_approved(&self, id: TestimonyId) -> Result<(), StorageError> {
        let mut state = self.lock()?;
        let testimony = state
            .testimonies
            .get_mut(&id)
            .ok_or(StorageError::NotFound)?;
        testimony.approve();
        Ok(())
    }

    async fn delete_testimony(&self, id: TestimonyId) -> Result<(), StorageError> {
        let mut state = self.lock()?;
        state
            .testimonies
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::NotFound)
    }

    async fn count_pending_testimonies(&self) -> Result<u64, StorageError> {
        let state = self.lock()?;
        Ok(state
            .testimonies
            .values()
            .filter(|t| !t.is_approved())
            .count() as u64)
    }
}

#[async_trait]
impl PrayerRequestRepository for InMemoryRepository {
    async fn insert_request(
        &self,
        request: NewPrayerRequestRecord,
    ) -> Result<PrayerRequestId, StorageError> {
        let mut state = self.lock()?;
        let id = PrayerRequestId::new(state.next_id());
        let request = request.into_request(id)?;
        state.prayers.insert(id, request);
        Ok(id)
    }

    async fn list_wall(&self, limit: u32) -> Result<Vec<PrayerRequest>, StorageError> {
        let state = self.lock()?;
        let mut requests: Vec<_> = state
            .prayers
            .values()
            .filter(|r| r.is_public())
            .cloned()
            .collect();
        requests.sort_by_key(|r| std::cmp::Reverse((r.created_at(), r.id().value())));
        Ok(truncated(requests, limit))
    }

    async fn list_pending_requests(
        &self,
        limit: u32,
    ) -> Result<Vec<PrayerRequest>, StorageError> {
        let state = self.lock()?;
        let mut requests: Vec<_> = state
            .prayers
            .values()
            .filter(|r| !r.is_approved())
            .cloned()
            .collect();
        requests.sort_by_key(|r| std::cmp::Reverse((r.created_at(), r.id().value())));
        Ok(truncated(requests, limit))
    }

    async fn set_request_approved(&self, id: PrayerRequestId) -> Result<(), StorageError> {
        let mut state = self.lock()?;
        let request = state.prayers.get_mut(&id).ok_or(StorageError::NotFound)?;
        request.approve();
        Ok(())
    }

    async fn delete_request(&self, id: PrayerRequestId) -> Result<(), StorageError> {
        let mut state = self.lock()?;
        state
            .prayers
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::NotFound)
    }

    async fn count_requests(&self) -> Result<u64, StorageError> {
        let state = self.lock()?;
        Ok(state.prayers.len() as u64)
    }
}

#[async_trait]
impl EventRepository for InMemoryRepository {
    async fn insert_event(&self, event: NewEventRecord) -> Result<EventId, StorageError> {
        let mut state = self.lock()?;
        let id = EventId::new(state.next_id());
        let event = event.into_event(id)?;
        state.events.insert(id, event);
        Ok(id)
    }

    async fn list_calendar(&self, limit: u32) -> Result<Vec<CalendarEvent>, StorageError> {
        let state = self.lock()?;
        let mut events: Vec<_> = state.events.values().cloned().collect();
        events.sort_by_key(|e| (e.starts_at(), e.id().value()));
        Ok(truncated(events, limit))
    }

    async fn list_upcoming(
        &self,
        after: DateTime<Utc>,
        limit: u32,
    ) -> Result<Vec<CalendarEvent>, StorageError> {
        let state = self.lock()?;
        let mut events: Vec<_> = state
            .events
            .values()
            .filter(|e| e.starts_at() >= after)
            .cloned()
            .collect();
        events.sort_by_key(|e| (e.starts_at(), e.id().value()));
        Ok(truncated(events, limit))
    }

    async fn delete_event(&self, id: EventId) -> Result<(), StorageError> {
        let mut state = self.lock()?;
        state
            .events
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::NotFound)
    }
}

#[async_trait]
impl QuizRepository for InMemoryRepository {
    async fn insert_quiz(&self, quiz: NewQuizRecord) -> Result<QuizId, StorageError> {
        let mut state = self.lock()?;
        let id = QuizId::new(state.next_id());
        let quiz = quiz.into_quiz(id)?;
        state.quizzes.insert(id, quiz);
        Ok(id)
    }

    async fn list_recent_quizzes(&self, limit: u32) -> Result<Vec<Quiz>, StorageError> {
        let state = self.lock()?;
        let mut quizzes: Vec<_> = state.quizzes.values().cloned().collect();
        quizzes.sort_by_key(|q| std::cmp::Reverse((q.created_at(), q.id().value())));
        Ok(truncated(quizzes, limit))
    }

    async fn get_quiz(&self, id: QuizId) -> Result<Option<Quiz>, StorageError> {
        let state = self.lock()?;
        Ok(state.quizzes.get(&id).cloned())
    }

    async fn delete_quiz(&self, id: QuizId) -> Result<(), StorageError> {
        let mut state = self.lock()?;
        state
            .quizzes
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::NotFound)
    }
}

#[async_trait]
impl GalleryRepository for InMemoryRepository {
    async fn insert_image(
        &self,
        image: NewGalleryImageRecord,
    ) -> Result<GalleryImageId, StorageError> {
        let mut state = self.lock()?;
        let id = GalleryImageId::new(state.next_id());
        let image = image.into_image(id)?;
        state.gallery.insert(id, image);
        Ok(id)
    }

    async fn list_recent_images(&self, limit: u32) -> Result<Vec<GalleryImage>, StorageError> {
        let state = self.lock()?;
        let mut images: Vec<_> = state.gallery.values().cloned().collect();
        images.sort_by_key(|i| std::cmp::Reverse((i.taken_at(), i.id().value())));
        Ok(truncated(images, limit))
    }

    async fn delete_image(&self, id: GalleryImageId) -> Result<(), StorageError> {
        let mut state = self.lock()?;
        state
            .gallery
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::NotFound)
    }
}

#[async_trait]
impl NotificationRepository for InMemoryRepository {
    async fn append_notification(
        &self,
        notification: NewNotificationRecord,
    ) -> Result<NotificationId, StorageError> {
        let mut state = self.lock()?;
        let id = NotificationId::new(state.next_id());
        let notification = notification.into_notification(id)?;
        state.notifications.insert(id, notification);
        Ok(id)
    }

    async fn list_recent_notifications(
        &self,
        limit: u32,
    ) -> Result<Vec<Notification>, StorageError> {
        let state = self.lock()?;
        let mut notifications: Vec<_> = state.notifications.values().cloned().collect();
        notifications.sort_by_key(|n| std::cmp::Reverse((n.created_at(), n.id().value())));
        Ok(truncated(notifications, limit))
    }

    async fn mark_notification_read(&self, id: NotificationId) -> Result<(), StorageError> {
        let mut state = self.lock()?;
        let notification = state
            .notifications
            .get_mut(&id)
            .ok_or(StorageError::NotFound)?;
        notification.mark_read();
        Ok(())
    }
}

impl Storage {
    /// Build a `Storage` backed entirely by memory.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_single(InMemoryRepository::new())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::time::fixed_now;

    #[tokio::test]
    async fn memory_repo_orders_wall_and_hides_private_requests() {
        let repo = InMemoryRepository::new();
        let now = fixed_now();

        let public = PrayerRequest::new(
            PrayerRequestId::new(1),
            MemberId::new("uid-1"),
            "Grace",
            "Pray for the building fund.",
            false,
            true,
            now,
        )
        .unwrap();
        let private = PrayerRequest::new(
            PrayerRequestId::new(2),
            MemberId::new("uid-2"),
            "Sam",
            "A private matter.",
            true,
            true,
            now + chrono::Duration::minutes(5),
        )
        .unwrap();

        repo.insert_request(NewPrayerRequestRecord::from_request(&public))
            .await
            .unwrap();
        repo.insert_request(NewPrayerRequestRecord::from_request(&private))
            .await
            .unwrap();

        let wall = repo.list_wall(10).await.unwrap();
        assert_eq!(wall.len(), 1);
        assert_eq!(wall[0].author_name(), "Grace");
    }

    #[tokio::test]
    async fn memory_repo_assigns_increasing_ids() {
        let repo = InMemoryRepository::new();
        let now = fixed_now();
        let testimony = Testimony::new(
            TestimonyId::new(1),
            MemberId::new("uid-1"),
            "Grace",
            "Provision came through.",
            false,
            now,
        )
        .unwrap();

        let first = repo
            .insert_testimony(NewTestimonyRecord::from_testimony(&testimony))
            .await
            .unwrap();
        let second = repo
            .insert_testimony(NewTestimonyRecord::from_testimony(&testimony))
            .await
            .unwrap();
        assert!(second.value() > first.value());
    }

    #[tokio::test]
    async fn memory_repo_set_role_requires_existing_profile() {
        let repo = InMemoryRepository::new();
        let err = repo
            .set_role(&MemberId::new("missing"), Role::Admin)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[test]
    fn repository_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<InMemoryRepository>();
    }
}
