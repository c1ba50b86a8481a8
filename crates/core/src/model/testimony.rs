use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::content::{BodyText, TextError};
use crate::model::ids::{MemberId, TestimonyId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TestimonyError {
    #[error("invalid testimony content: {0}")]
    Content(#[source] TextError),

    #[error("author name cannot be empty")]
    EmptyAuthorName,
}

/// A member's testimony.
///
/// Submitted unapproved; only approved testimonies appear in the public
/// feed, while authors always see their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Testimony {
    id: TestimonyId,
    author_id: MemberId,
    author_name: String,
    content: BodyText,
    approved: bool,
    created_at: DateTime<Utc>,
}

impl Testimony {
    /// Creates a new testimony.
    ///
    /// # Errors
    ///
    /// Returns `TestimonyError` for empty content or author name.
    pub fn new(
        id: TestimonyId,
        author_id: MemberId,
        author_name: impl Into<String>,
        content: impl Into<String>,
        approved: bool,
        created_at: DateTime<Utc>,
    ) -> Result<Self, TestimonyError> {
        let author_name = author_name.into().trim().to_owned();
        if author_name.is_empty() {
            return Err(TestimonyError::EmptyAuthorName);
        }
        let content = BodyText::parse(content.into()).map_err(TestimonyError::Content)?;

        Ok(Self {
            id,
            author_id,
            author_name,
            content,
            approved,
            created_at,
        })
    }

    /// Marks the testimony approved for the public feed.
    pub fn approve(&mut self) {
        self.approved = true;
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> TestimonyId {
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
    pub fn is_approved(&self) -> bool {
        self.approved
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
