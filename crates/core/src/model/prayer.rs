use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::content::{BodyText, TextError};
use crate::model::ids::{MemberId, PrayerRequestId};

/// Display name used in place of the author's for private requests.
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PrayerError {
    #[error("invalid prayer request content: {0}")]
    Content(#[source] TextError),

    #[error("author name cannot be empty")]
    EmptyAuthorName,
}

/// A prayer request on the wall.
///
/// Requests are submitted unapproved. The public wall shows only approved,
/// non-private requests; a private request keeps the author anonymous even
/// to moderators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrayerRequest {
    id: PrayerRequestId,
    author_id: MemberId,
    author_name: String,
    content: BodyText,
    is_private: bool,
    approved: bool,
    created_at: DateTime<Utc>,
}

impl PrayerRequest {
    /// Creates a new prayer request. Private requests are stored under the
    /// anonymous display name regardless of the name passed in.
    ///
    /// # Errors
    ///
    /// Returns `PrayerError` for empty content or author name.
    pub fn new(
        id: PrayerRequestId,
        author_id: MemberId,
        author_name: impl Into<String>,
        content: impl Into<String>,
        is_private: bool,
        approved: bool,
        created_at: DateTime<Utc>,
    ) -> Result<Self, PrayerError> {
        let author_name = if is_private {
            ANONYMOUS_AUTHOR.to_owned()
        } else {
            let name = author_name.into().trim().to_owned();
            if name.is_empty() {
                return Err(PrayerError::EmptyAuthorName);
            }
            name
        };
        let content = BodyText::parse(content.into()).map_err(PrayerError::Content)?;

        Ok(Self {
            id,
            author_id,
            author_name,
            content,
            is_private,
            approved,
            created_at,
        })
    }

    /// Marks the request approved for the wall.
    pub fn approve(&mut self) {
        self.approved = true;
    }

    /// True when the request may appear on the public wall.
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.approved && !self.is_private
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> PrayerRequestId {
        self.id
    }

    #[must_use]
    pub fn author_id(&self) -> &MemberId {
        &self.author_id
    }

    #[must_use]
    pub fn author_name(&self) -> &str {
        &self.author_name
    }

    #[must_use]
    pub fn content(&self) -> &str {
        self.content.as_str()
    }

    #[must_use]
    pub fn is_private(&self) -> bool {
        self.is_private
    }

    #[must_use]
    pub fn is_approved(&self) -> bool {
        self.approved
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
    fn private_request_is_anonymous() {
        let request = PrayerRequest::new(
            PrayerRequestId::new(1),
            MemberId::new("uid-1"),
            "Grace",
            "Please pray for my exams.",
            true,
            false,
            fixed_now(),
        )
        .unwrap();

        assert_eq!(request.author_name(), ANONYMOUS_AUTHOR);
        assert!(request.is_private());
    }

    #[test]
    fn only_approved_public_requests_reach_the_wall() {
        let mut request = PrayerRequest::new(
            PrayerRequestId::new(1),
            MemberId::new("uid-1"),
            "Grace",
            "Travelling mercies for the mission trip.",
            false,
            false,
            fixed_now(),
        )
        .unwrap();

        assert!(!request.is_public());
        request.approve();
        assert!(request.is_public());
    }

    #[test]
    fn approved_private_request_stays_off_the_wall() {
        let mut request = PrayerRequest::new(
            PrayerRequestId::new(2),
            MemberId::new("uid-2"),
            "Sam",
            "A personal matter.",
            true,
            false,
            fixed_now(),
        )
        .unwrap();

        request.approve();
        assert!(!request.is_public());
    }
}
