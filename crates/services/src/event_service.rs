use std::sync::Arc;

use chrono::{DateTime, Utc};
use portal_core::model::{CalendarEvent, EventId, EventKind, Profile};
use storage::repository::{EventRepository, NewEventRecord};

use crate::Clock;
use crate::error::EventServiceError;

/// Default number of events fetched for the calendar view.
const CALENDAR_LIMIT: u32 = 200;

/// Orchestrates the events calendar.
#[derive(Clone)]
pub struct EventService {
    clock: Clock,
    events: Arc<dyn EventRepository>,
}

impl EventService {
    #[must_use]
    pub fn new(clock: Clock, events: Arc<dyn EventRepository>) -> Self {
        Self { clock, events }
    }

    /// The full calendar, soonest-first.
    ///
    /// # Errors
    ///
    /// Returns `EventServiceError::Storage` if repository access fails.
    pub async fn calendar(&self) -> Result<Vec<CalendarEvent>, EventServiceError> {
        let events = self.events.list_calendar(CALENDAR_LIMIT).await?;
        Ok(events)
    }

    /// Events that have not started yet, soonest-first.
    ///
    /// # Errors
    ///
    /// Returns `EventServiceError::Storage` if repository access fails.
    pub async fn upcoming(&self, limit: u32) -> Result<Vec<CalendarEvent>, EventServiceError> {
        let now = self.clock.now();
        let events = self.events.list_upcoming(now, limit).await?;
        Ok(events)
    }

    /// Put an event on the calendar.
    ///
    /// # Errors
    ///
    /// Returns `EventServiceError::Event` for validation failures and
    /// `EventServiceError::Storage` if persistence fails.
    pub async fn create_event(
        &self,
        creator: &Profile,
        title: &str,
        description: &str,
        starts_at: DateTime<Utc>,
        kind: EventKind,
    ) -> Result<EventId, EventServiceError> {
        let now = self.clock.now();
        let event = CalendarEvent::new(
            EventId::new(1),
            title,
            description,
            starts_at,
            kind,
            creator.id().clone(),
            now,
        )?;
        let id = self
            .events
            .insert_event(NewEventRecord::from_event(&event))
            .await?;
        tracing::info!(event = %id, title, kind = kind.as_str(), "event created");
        Ok(id)
    }

    /// Take an event off the calendar.
    ///
    /// # Errors
    ///
    /// Returns `EventServiceError::Storage` if it does not exist or
    /// deletion fails.
    pub async fn delete_event(&self, id: EventId) -> Result<(), EventServiceError> {
        self.events.delete_event(id).await?;
        tracing::info!(event = %id, "event deleted");
        Ok(())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use portal_core::model::{MemberId, Role};
    use portal_core::time::{fixed_clock, fixed_now};
    use storage::repository::InMemoryRepository;

    fn profile() -> Profile {
        Profile::new(
            MemberId::new("uid-1"),
            "grace@example.org",
            "Grace",
            None,
            Role::Member,
            None,
            None,
            None,
            fixed_now(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn upcoming_skips_past_events() {
        let service = EventService::new(fixed_clock(), Arc::new(InMemoryRepository::new()));
        let creator = profile();

        service
            .create_event(
                &creator,
                "Past Service",
                "",
                fixed_now() - Duration::days(1),
                EventKind::Service,
            )
            .await
            .unwrap();
        service
            .create_event(
                &creator,
                "Youth Hangout",
                "",
                fixed_now() + Duration::days(3),
                EventKind::Youth,
            )
            .await
            .unwrap();

        assert_eq!(service.calendar().await.unwrap().len(), 2);

        let upcoming = service.upcoming(10).await.unwrap();
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].title(), "Youth Hangout");
    }

    #[tokio::test]
    async fn create_event_requires_a_title() {
        let service = EventService::new(fixed_clock(), Arc::new(InMemoryRepository::new()));
        let err = service
            .create_event(&profile(), "  ", "", fixed_now(), EventKind::Service)
            .await
            .unwrap_err();
        assert!(matches!(err, EventServiceError::Event(_)));
    }
}
