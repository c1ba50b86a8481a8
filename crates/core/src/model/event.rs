use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::{EventId, MemberId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EventError {
    #[error("event title cannot be empty")]
    EmptyTitle,

    #[error("invalid event kind: {0}")]
    InvalidKind(String),
}

/// Category of a calendar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Service,
    Youth,
    Outreach,
}

impl EventKind {
    /// Parse the stored string form.
    ///
    /// # Errors
    ///
    /// Returns `EventError::InvalidKind` for unknown values.
    pub fn parse(s: &str) -> Result<Self, EventError> {
        match s {
            "service" => Ok(Self::Service),
            "youth" => Ok(Self::Youth),
            "outreach" => Ok(Self::Outreach),
            other => Err(EventError::InvalidKind(other.to_owned())),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Service => "service",
            EventKind::Youth => "youth",
            EventKind::Outreach => "outreach",
        }
    }
}

/// An entry on the church calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    id: EventId,
    title: String,
    description: String,
    starts_at: DateTime<Utc>,
    kind: EventKind,
    created_by: MemberId,
    created_at: DateTime<Utc>,
}

impl CalendarEvent {
    /// Creates a new calendar event.
    ///
    /// # Errors
    ///
    /// Returns `EventError::EmptyTitle` if the title is empty after
    /// trimming.
    pub fn new(
        id: EventId,
        title: impl Into<String>,
        description: impl Into<String>,
        starts_at: DateTime<Utc>,
        kind: EventKind,
        created_by: MemberId,
        created_at: DateTime<Utc>,
    ) -> Result<Self, EventError> {
        let title = title.into().trim().to_owned();
        if title.is_empty() {
            return Err(EventError::EmptyTitle);
        }

        Ok(Self {
            id,
            title,
            description: description.into().trim().to_owned(),
            starts_at,
            kind,
            created_by,
            created_at,
        })
    }

    /// True when the event has not started yet.
    #[must_use]
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.starts_at >= now
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> EventId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn starts_at(&self) -> DateTime<Utc> {
        self.starts_at
    }

    #[must_use]
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    #[must_use]
    pub fn created_by(&self) -> &MemberId {
        &self.created_by
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
