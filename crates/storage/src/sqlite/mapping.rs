use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use portal_core::model::{
    CalendarEvent, Difficulty, EventId, EventKind, GalleryImage, GalleryImageId, MediaUrl,
    MemberId, Notification, NotificationId, NotificationKind, PrayerRequest, PrayerRequestId,
    Profile, Quiz, QuizId, Role, Sermon, SermonId, Testimony, TestimonyId,
};

use crate::repository::{QuestionRecord, StorageError};

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn u64_from_i64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

pub(crate) fn i64_from_u64(field: &'static str, v: u64) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

fn media_url_opt(value: Option<String>) -> Result<Option<MediaUrl>, StorageError> {
    value.as_deref().map(MediaUrl::parse).transpose().map_err(ser)
}

pub(crate) fn map_profile_row(row: &SqliteRow) -> Result<Profile, StorageError> {
    let role_str: String = row.try_get("role").map_err(ser)?;
    let role = Role::parse(&role_str).map_err(ser)?;
    let photo_url = media_url_opt(row.try_get("photo_url").map_err(ser)?)?;

    Profile::new(
        MemberId::new(row.try_get::<String, _>("id").map_err(ser)?),
        row.try_get::<String, _>("email").map_err(ser)?,
        row.try_get::<String, _>("display_name").map_err(ser)?,
        photo_url,
        role,
        row.try_get("phone_number").map_err(ser)?,
        row.try_get("hostel_name").map_err(ser)?,
        row.try_get("date_of_birth").map_err(ser)?,
        row.try_get("created_at").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_sermon_row(row: &SqliteRow) -> Result<Sermon, StorageError> {
    let cover_url = media_url_opt(row.try_get("cover_url").map_err(ser)?)?;
    let audio_url = media_url_opt(row.try_get("audio_url").map_err(ser)?)?;

    Sermon::new(
        SermonId::new(u64_from_i64("id", row.try_get("id").map_err(ser)?)?),
        row.try_get::<String, _>("title").map_err(ser)?,
        row.try_get::<String, _>("description").map_err(ser)?,
        row.try_get::<String, _>("preacher").map_err(ser)?,
        row.try_get::<String, _>("series").map_err(ser)?,
        row.try_get("preached_at").map_err(ser)?,
        row.try_get::<String, _>("duration").map_err(ser)?,
        cover_url,
        audio_url,
        row.try_get("created_at").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_testimony_row(row: &SqliteRow) -> Result<Testimony, StorageError> {
    Testimony::new(
        TestimonyId::new(u64_from_i64("id", row.try_get("id").map_err(ser)?)?),
        MemberId::new(row.try_get::<String, _>("author_id").map_err(ser)?),
        row.try_get::<String, _>("author_name").map_err(ser)?,
        row.try_get::<String, _>("content").map_err(ser)?,
        row.try_get("approved").map_err(ser)?,
        row.try_get("created_at").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_prayer_row(row: &SqliteRow) -> Result<PrayerRequest, StorageError> {
    PrayerRequest::new(
        PrayerRequestId::new(u64_from_i64("id", row.try_get("id").map_err(ser)?)?),
        MemberId::new(row.try_get::<String, _>("author_id").map_err(ser)?),
        row.try_get::<String, _>("author_name").map_err(ser)?,
        row.try_get::<String, _>("content").map_err(ser)?,
        row.try_get("is_private").map_err(ser)?,
        row.try_get("approved").map_err(ser)?,
        row.try_get("created_at").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_event_row(row: &SqliteRow) -> Result<CalendarEvent, StorageError> {
    let kind_str: String = row.try_get("kind").map_err(ser)?;
    let kind = EventKind::parse(&kind_str).map_err(ser)?;

    CalendarEvent::new(
        EventId::new(u64_from_i64("id", row.try_get("id").map_err(ser)?)?),
        row.try_get::<String, _>("title").map_err(ser)?,
        row.try_get::<String, _>("description").map_err(ser)?,
        row.try_get("starts_at").map_err(ser)?,
        kind,
        MemberId::new(row.try_get::<String, _>("created_by").map_err(ser)?),
        row.try_get("created_at").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_quiz_row(row: &SqliteRow) -> Result<Quiz, StorageError> {
    let difficulty_str: String = row.try_get("difficulty").map_err(ser)?;
    let difficulty = Difficulty::parse(&difficulty_str).map_err(ser)?;

    // Questions live as one JSON document per quiz and re-validate on the
    // way out.
    let questions_json: String = row.try_get("questions").map_err(ser)?;
    let records: Vec<QuestionRecord> = serde_json::from_str(&questions_json).map_err(ser)?;
    let mut questions = Vec::with_capacity(records.len());
    for record in records {
        questions.push(record.into_question()?);
    }

    Quiz::new(
        QuizId::new(u64_from_i64("id", row.try_get("id").map_err(ser)?)?),
        row.try_get::<String, _>("topic").map_err(ser)?,
        difficulty,
        questions,
        row.try_get("created_at").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_image_row(row: &SqliteRow) -> Result<GalleryImage, StorageError> {
    let url = MediaUrl::parse(&row.try_get::<String, _>("url").map_err(ser)?).map_err(ser)?;

    GalleryImage::new(
        GalleryImageId::new(u64_from_i64("id", row.try_get("id").map_err(ser)?)?),
        url,
        row.try_get::<String, _>("caption").map_err(ser)?,
        row.try_get("taken_at").map_err(ser)?,
        MemberId::new(row.try_get::<String, _>("uploaded_by").map_err(ser)?),
    )
    .map_err(ser)
}

pub(crate) fn map_notification_row(row: &SqliteRow) -> Result<Notification, StorageError> {
    let kind_str: String = row.try_get("kind").map_err(ser)?;
    let kind = NotificationKind::parse(&kind_str).map_err(ser)?;

    Notification::new(
        NotificationId::new(u64_from_i64("id", row.try_get("id").map_err(ser)?)?),
        row.try_get::<String, _>("title").map_err(ser)?,
        row.try_get::<String, _>("message").map_err(ser)?,
        kind,
        row.try_get("is_read").map_err(ser)?,
        row.try_get("created_at").map_err(ser)?,
    )
    .map_err(ser)
}
