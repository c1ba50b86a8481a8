use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a member profile.
///
/// Issued by the external authentication provider, so the value is an
/// opaque string rather than a row id.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberId(String);

impl MemberId {
    /// Creates a new `MemberId` from the provider-issued subject.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemberId({})", self.0)
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MemberId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

macro_rules! row_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name(u64);

        impl $name {
            #[doc = concat!("Creates a new `", stringify!($name), "`")]
            #[must_use]
            pub fn new(id: u64) -> Self {
                Self(id)
            }

            /// Returns the underlying u64 value
            #[must_use]
            pub fn value(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<u64>().map($name::new).map_err(|_| ParseIdError {
                    kind: stringify!($name),
                })
            }
        }
    };
}

row_id! {
    /// Unique identifier for a sermon recording.
    SermonId
}
row_id! {
    /// Unique identifier for a testimony.
    TestimonyId
}
row_id! {
    /// Unique identifier for a prayer request.
    PrayerRequestId
}
row_id! {
    /// Unique identifier for a calendar event.
    EventId
}
row_id! {
    /// Unique identifier for a quiz.
    QuizId
}
row_id! {
    /// Unique identifier for a gallery image.
    GalleryImageId
}
row_id! {
    /// Unique identifier for a notification.
    NotificationId
}

/// Error type for parsing an ID from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: &'static str,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_id_display() {
        let id = QuizId::new(42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn quiz_id_from_str() {
        let id: QuizId = "123".parse().unwrap();
        assert_eq!(id, QuizId::new(123));
    }

    #[test]
    fn sermon_id_from_str_invalid() {
        let result = "not-a-number".parse::<SermonId>();
        assert!(result.is_err());
    }

    #[test]
    fn row_id_roundtrip() {
        let original = EventId::new(77);
        let serialized = original.to_string();
        let deserialized: EventId = serialized.parse().unwrap();
        assert_eq!(original, deserialized);
    }

    #[test]
    fn member_id_wraps_provider_subject() {
        let id = MemberId::new("uid-abc-123");
        assert_eq!(id.as_str(), "uid-abc-123");
        assert_eq!(id.to_string(), "uid-abc-123");
    }
}
