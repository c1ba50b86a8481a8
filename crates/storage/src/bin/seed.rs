use std::fmt;

use chrono::{DateTime, Duration, Utc};
use portal_core::model::{
    CalendarEvent, Difficulty, EventId, EventKind, GalleryImage, GalleryImageId, MediaUrl,
    MemberId, Profile, Quiz, QuizId, QuizQuestion, Role, Sermon, SermonId, Testimony,
    TestimonyId,
};
use storage::repository::{
    NewEventRecord, NewGalleryImageRecord, NewNotificationRecord, NewQuizRecord,
    NewSermonRecord, NewTestimonyRecord, Storage,
};

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    sermons: u32,
    now: Option<DateTime<Utc>>,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidSermons { raw: String },
    InvalidNow { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidSermons { raw } => write!(f, "invalid --sermons value: {raw}"),
            ArgsError::InvalidNow { raw } => {
                write!(f, "invalid --now value (expected RFC3339): {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url =
            std::env::var("PORTAL_DB_URL").unwrap_or_else(|_| "sqlite:portal.sqlite3".into());
        let mut sermons = 3_u32;
        let mut now = None;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => db_url = require_value(&mut args, "--db")?,
                "--sermons" => {
                    let raw = require_value(&mut args, "--sermons")?;
                    sermons = raw
                        .parse()
                        .map_err(|_| ArgsError::InvalidSermons { raw })?;
                }
                "--now" => {
                    let raw = require_value(&mut args, "--now")?;
                    let parsed = DateTime::parse_from_rfc3339(&raw)
                        .map_err(|_| ArgsError::InvalidNow { raw })?;
                    now = Some(parsed.with_timezone(&Utc));
                }
                other => return Err(ArgsError::UnknownArg(other.to_owned())),
            }
        }

        Ok(Self {
            db_url,
            sermons,
            now,
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse()?;
    let now = args.now.unwrap_or_else(Utc::now);

    let storage = Storage::sqlite(&args.db_url).await?;
    tracing::info!(db = %args.db_url, "seeding portal database");

    let admin = Profile::new(
        MemberId::new("seed-admin"),
        "admin@example.org",
        "Portal Admin",
        None,
        Role::Admin,
        None,
        None,
        None,
        now,
    )?;
    storage.members.upsert_profile(&admin).await?;

    let member = Profile::new(
        MemberId::new("seed-member"),
        "grace@example.org",
        "Grace Adeyemi",
        None,
        Role::Member,
        Some("+234 800 000 0000".into()),
        Some("Bethel Hall".into()),
        None,
        now,
    )?;
    storage.members.upsert_profile(&member).await?;

    for i in 0..args.sermons {
        let sermon = Sermon::new(
            SermonId::new(1),
            format!("Faith That Works, Part {}", i + 1),
            "Working through the book of James.",
            "Pastor John",
            "Faith That Works",
            now - Duration::days(i64::from(i) * 7),
            "41:30",
            None,
            Some(MediaUrl::parse(&format!(
                "https://cdn.example.org/sermons/audio/james-{}.mp3",
                i + 1
            ))?),
            now,
        )?;
        storage
            .sermons
            .insert_sermon(NewSermonRecord::from_sermon(&sermon))
            .await?;
    }

    let testimony = Testimony::new(
        TestimonyId::new(1),
        member.id().clone(),
        member.display_name(),
        "The fellowship stood with us through a hard season and we saw provision arrive.",
        true,
        now - Duration::days(2),
    )?;
    storage
        .testimonies
        .insert_testimony(NewTestimonyRecord::from_testimony(&testimony))
        .await?;

    let event = CalendarEvent::new(
        EventId::new(1),
        "Youth Hangout",
        "Games, worship and small groups at the annex.",
        now + Duration::days(5),
        EventKind::Youth,
        admin.id().clone(),
        now,
    )?;
    storage
        .events
        .insert_event(NewEventRecord::from_event(&event))
        .await?;

    let quiz = Quiz::new(
        QuizId::new(1),
        "The Gospels",
        Difficulty::Easy,
        vec![
            QuizQuestion::new(
                "How many Gospels are in the New Testament?",
                vec!["Three".into(), "Four".into(), "Five".into(), "Six".into()],
                1,
            )?,
            QuizQuestion::new(
                "Which Gospel opens with 'In the beginning was the Word'?",
                vec![
                    "Matthew".into(),
                    "Mark".into(),
                    "Luke".into(),
                    "John".into(),
                ],
                3,
            )?,
        ],
        now - Duration::days(1),
    )?;
    storage
        .quizzes
        .insert_quiz(NewQuizRecord::from_quiz(&quiz))
        .await?;

    let image = GalleryImage::new(
        GalleryImageId::new(1),
        MediaUrl::parse("https://cdn.example.org/gallery/harvest-sunday.jpg")?,
        "Harvest Sunday",
        now - Duration::days(10),
        admin.id().clone(),
    )?;
    storage
        .gallery
        .insert_image(NewGalleryImageRecord::from_image(&image))
        .await?;

    storage
        .notifications
        .append_notification(NewNotificationRecord {
            title: "Welcome to the portal".into(),
            message: "Seed data is ready to explore.".into(),
            kind: portal_core::model::NotificationKind::Info,
            created_at: now,
        })
        .await?;

    tracing::info!(sermons = args.sermons, "seed complete");
    Ok(())
}
