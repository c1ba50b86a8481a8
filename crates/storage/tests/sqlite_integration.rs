use chrono::Duration;
use portal_core::model::{
    CalendarEvent, Difficulty, EventId, EventKind, MediaUrl, MemberId, NotificationKind,
    PrayerRequest, PrayerRequestId, Profile, Quiz, QuizId, QuizQuestion, Role, Sermon, SermonId,
    Testimony, TestimonyId,
};
use portal_core::time::fixed_now;
use storage::repository::{
    EventRepository, MemberRepository, NewEventRecord, NewNotificationRecord,
    NewPrayerRequestRecord, NewQuizRecord, NewSermonRecord, NewTestimonyRecord,
    NotificationRepository, PrayerRequestRepository, QuizRepository, SermonRepository,
    StorageError, TestimonyRepository,
};
use storage::sqlite::SqliteRepository;

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

fn build_profile(id: &str, role: Role) -> Profile {
    Profile::new(
        MemberId::new(id),
        format!("{id}@example.org"),
        "Test Member",
        None,
        role,
        None,
        None,
        None,
        fixed_now(),
    )
    .unwrap()
}

#[tokio::test]
async fn sqlite_profile_roundtrip_and_role_update() {
    let repo = connect("memdb_profiles").await;

    let profile = build_profile("uid-1", Role::Member);
    repo.upsert_profile(&profile).await.unwrap();

    let fetched = repo
        .get_profile(&MemberId::new("uid-1"))
        .await
        .unwrap()
        .expect("profile exists");
    assert_eq!(fetched.email(), "uid-1@example.org");
    assert_eq!(fetched.role(), Role::Member);

    repo.set_role(&MemberId::new("uid-1"), Role::Admin)
        .await
        .unwrap();
    let fetched = repo
        .get_profile(&MemberId::new("uid-1"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.role(), Role::Admin);

    let err = repo
        .set_role(&MemberId::new("missing"), Role::Admin)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}

#[tokio::test]
async fn sqlite_sermons_list_newest_first() {
    let repo = connect("memdb_sermons").await;
    let now = fixed_now();

    for (i, title) in ["Older", "Newer"].iter().enumerate() {
        let sermon = Sermon::new(
            SermonId::new(1),
            *title,
            "",
            "Pastor John",
            "Series",
            now + Duration::days(i as i64),
            "40:00",
            None,
            Some(MediaUrl::parse("https://cdn.example.org/audio/a.mp3").unwrap()),
            now,
        )
        .unwrap();
        repo.insert_sermon(NewSermonRecord::from_sermon(&sermon))
            .await
            .unwrap();
    }

    let sermons = repo.list_recent_sermons(10).await.unwrap();
    assert_eq!(sermons.len(), 2);
    assert_eq!(sermons[0].title(), "Newer");
    assert_eq!(
        sermons[0].audio_url().unwrap().as_str(),
        "https://cdn.example.org/audio/a.mp3"
    );
    assert_eq!(repo.count_sermons().await.unwrap(), 2);
}

#[tokio::test]
async fn sqlite_testimony_moderation_queries() {
    let repo = connect("memdb_testimonies").await;
    let now = fixed_now();

    let pending = Testimony::new(
        TestimonyId::new(1),
        MemberId::new("uid-1"),
        "Grace",
        "Still waiting on approval.",
        false,
        now,
    )
    .unwrap();
    let id = repo
        .insert_testimony(NewTestimonyRecord::from_testimony(&pending))
        .await
        .unwrap();

    assert!(repo.list_approved(10).await.unwrap().is_empty());
    assert_eq!(repo.list_pending(10).await.unwrap().len(), 1);
    assert_eq!(repo.count_pending_testimonies().await.unwrap(), 1);

    repo.set_testimony_approved(id).await.unwrap();
    let approved = repo.list_approved(10).await.unwrap();
    assert_eq!(approved.len(), 1);
    assert!(approved[0].is_approved());

    let mine = repo.list_by_author(&MemberId::new("uid-1")).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert!(
        repo.list_by_author(&MemberId::new("uid-2"))
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn sqlite_wall_excludes_private_and_pending_requests() {
    let repo = connect("memdb_prayers").await;
    let now = fixed_now();

    let visible = PrayerRequest::new(
        PrayerRequestId::new(1),
        MemberId::new("uid-1"),
        "Grace",
        "Pray for the mission trip.",
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
        now,
    )
    .unwrap();
    let pending = PrayerRequest::new(
        PrayerRequestId::new(3),
        MemberId::new("uid-3"),
        "Ruth",
        "Healing for my mother.",
        false,
        false,
        now,
    )
    .unwrap();

    for request in [&visible, &private, &pending] {
        repo.insert_request(NewPrayerRequestRecord::from_request(request))
            .await
            .unwrap();
    }

    let wall = repo.list_wall(10).await.unwrap();
    assert_eq!(wall.len(), 1);
    assert_eq!(wall[0].author_name(), "Grace");

    let pending_list = repo.list_pending_requests(10).await.unwrap();
    assert_eq!(pending_list.len(), 1);
    assert_eq!(pending_list[0].author_name(), "Ruth");

    assert_eq!(repo.count_requests().await.unwrap(), 3);
}

#[tokio::test]
async fn sqlite_events_order_and_upcoming_filter() {
    let repo = connect("memdb_events").await;
    let now = fixed_now();

    for (title, offset) in [("Past", -3), ("Soon", 2), ("Later", 9)] {
        let event = CalendarEvent::new(
            EventId::new(1),
            title,
            "",
            now + Duration::days(offset),
            EventKind::Service,
            MemberId::new("uid-1"),
            now,
        )
        .unwrap();
        repo.insert_event(NewEventRecord::from_event(&event))
            .await
            .unwrap();
    }

    let calendar = repo.list_calendar(10).await.unwrap();
    let titles: Vec<_> = calendar.iter().map(|e| e.title().to_owned()).collect();
    assert_eq!(titles, ["Past", "Soon", "Later"]);

    let upcoming = repo.list_upcoming(now, 10).await.unwrap();
    let titles: Vec<_> = upcoming.iter().map(|e| e.title().to_owned()).collect();
    assert_eq!(titles, ["Soon", "Later"]);
}

#[tokio::test]
async fn sqlite_quiz_roundtrip_preserves_question_shape() {
    let repo = connect("memdb_quizzes").await;
    let now = fixed_now();

    let quiz = Quiz::new(
        QuizId::new(1),
        "The Gospels",
        Difficulty::Medium,
        vec![
            QuizQuestion::new(
                "Who baptized Jesus?",
                vec![
                    "Peter".into(),
                    "John the Baptist".into(),
                    "Paul".into(),
                    "Andrew".into(),
                ],
                1,
            )
            .unwrap(),
            QuizQuestion::new(
                "Where was Jesus born?",
                vec![
                    "Nazareth".into(),
                    "Jerusalem".into(),
                    "Bethlehem".into(),
                    "Capernaum".into(),
                ],
                2,
            )
            .unwrap(),
        ],
        now,
    )
    .unwrap();

    let id = repo
        .insert_quiz(NewQuizRecord::from_quiz(&quiz))
        .await
        .unwrap();

    let fetched = repo.get_quiz(id).await.unwrap().expect("quiz exists");
    assert_eq!(fetched.topic(), "The Gospels");
    assert_eq!(fetched.difficulty(), Difficulty::Medium);
    assert_eq!(fetched.question_count(), 2);
    assert_eq!(fetched.questions()[0].correct_index(), 1);
    assert_eq!(fetched.questions()[1].options()[2], "Bethlehem");

    assert!(repo.get_quiz(QuizId::new(999)).await.unwrap().is_none());

    repo.delete_quiz(id).await.unwrap();
    assert!(repo.list_recent_quizzes(10).await.unwrap().is_empty());
}

#[tokio::test]
async fn sqlite_notifications_append_and_mark_read() {
    let repo = connect("memdb_notifications").await;
    let now = fixed_now();

    let id = repo
        .append_notification(NewNotificationRecord {
            title: "New Testimony Shared".into(),
            message: "A new testimony is live on the feed.".into(),
            kind: NotificationKind::Success,
            created_at: now,
        })
        .await
        .unwrap();

    let feed = repo.list_recent_notifications(5).await.unwrap();
    assert_eq!(feed.len(), 1);
    assert!(!feed[0].is_read());

    repo.mark_notification_read(id).await.unwrap();
    let feed = repo.list_recent_notifications(5).await.unwrap();
    assert!(feed[0].is_read());
}
