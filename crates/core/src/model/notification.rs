use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::NotificationId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotificationError {
    #[error("notification title cannot be empty")]
    EmptyTitle,

    #[error("invalid notification kind: {0}")]
    InvalidKind(String),
}

/// Severity/intent of a notification, mirrored in the bell popover styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    /// Parse the stored string form.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError::InvalidKind` for unknown values.
    pub fn parse(s: &str) -> Result<Self, NotificationError> {
        match s {
            "info" => Ok(Self::Info),
            "success" => Ok(Self::Success),
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            other => Err(NotificationError::InvalidKind(other.to_owned())),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Warning => "warning",
            NotificationKind::Error => "error",
        }
    }
}

/// A broadcast entry in the community feed.
///
/// The same records double as the admin dashboard's recent-activity feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    id: NotificationId,
    title: String,
    message: String,
    kind: NotificationKind,
    is_read: bool,
    created_at: DateTime<Utc>,
}

impl Notification {
    /// Creates a new notification.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError::EmptyTitle` if the title is empty after
    /// trimming.
    pub fn new(
        id: NotificationId,
        title: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationKind,
        is_read: bool,
        created_at: DateTime<Utc>,
    ) -> Result<Self, NotificationError> {
        let title = title.into().trim().to_owned();
        if title.is_empty() {
            return Err(NotificationError::EmptyTitle);
        }

        Ok(Self {
            id,
            title,
            message: message.into().trim().to_owned(),
            kind,
            is_read,
            created_at,
        })
    }

    /// Marks the notification as read.
    pub fn mark_read(&mut self) {
        self.is_read = true;
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    #[must_use]
    pub fn is_read(&self) -> bool {
        self.is_read
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn notification_kind_round_trips() {
        assert_eq!(
            NotificationKind::parse("success").unwrap(),
            NotificationKind::Success
        );
        assert_eq!(
            NotificationKind::parse(NotificationKind::Warning.as_str()).unwrap(),
            NotificationKind::Warning
        );
        assert!(NotificationKind::parse("urgent").is_err());
    }

    #[test]
    fn notification_starts_unread() {
        let mut n = Notification::new(
            NotificationId::new(1),
            "New Testimony Shared",
            "A new testimony is live on the feed.",
            NotificationKind::Success,
            false,
            fixed_now(),
        )
        .unwrap();

        assert!(!n.is_read());
        n.mark_read();
        assert!(n.is_read());
    }
}
