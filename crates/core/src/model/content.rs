use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Longest user-submitted body we accept (testimonies, prayer requests).
pub const MAX_BODY_LEN: usize = 4_000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TextError {
    #[error("text cannot be empty")]
    Empty,

    #[error("text exceeds {MAX_BODY_LEN} characters: {len}")]
    TooLong { len: usize },
}

/// Trimmed, non-empty, bounded user text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BodyText(String);

impl BodyText {
    /// Parse user input into a `BodyText`.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` for whitespace-only input and
    /// `TextError::TooLong` past [`MAX_BODY_LEN`] characters.
    pub fn parse(s: impl Into<String>) -> Result<Self, TextError> {
        let s = s.into();
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        let len = trimmed.chars().count();
        if len > MAX_BODY_LEN {
            return Err(TextError::TooLong { len });
        }
        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MediaUrlError {
    #[error("media url is not a valid absolute url")]
    Invalid,

    #[error("media url must use http or https")]
    UnsupportedScheme,
}

/// Absolute URL pointing at hosted media (sermon audio, cover art, photos).
///
/// The portal never stores file bytes; uploads happen elsewhere and only the
/// resulting URL is recorded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaUrl(Url);

impl MediaUrl {
    /// Parse and validate a media URL.
    ///
    /// # Errors
    ///
    /// Returns `MediaUrlError::Invalid` if the string is not an absolute
    /// URL, or `MediaUrlError::UnsupportedScheme` for non-http(s) schemes.
    pub fn parse(s: &str) -> Result<Self, MediaUrlError> {
        let url = Url::parse(s.trim()).map_err(|_| MediaUrlError::Invalid)?;
        match url.scheme() {
            "http" | "https" => Ok(Self(url)),
            _ => Err(MediaUrlError::UnsupportedScheme),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    #[must_use]
    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_text_trims_and_keeps_content() {
        let body = BodyText::parse("  God has been faithful.  ").unwrap();
        assert_eq!(body.as_str(), "God has been faithful.");
    }

    #[test]
    fn body_text_rejects_whitespace_only() {
        assert_eq!(BodyText::parse("   ").unwrap_err(), TextError::Empty);
    }

    #[test]
    fn body_text_rejects_oversized_input() {
        let huge = "x".repeat(MAX_BODY_LEN + 1);
        assert!(matches!(
            BodyText::parse(huge).unwrap_err(),
            TextError::TooLong { .. }
        ));
    }

    #[test]
    fn media_url_accepts_https() {
        let url = MediaUrl::parse("https://cdn.example.org/sermons/audio/42.mp3").unwrap();
        assert_eq!(url.as_str(), "https://cdn.example.org/sermons/audio/42.mp3");
    }

    #[test]
    fn media_url_rejects_relative_path() {
        assert_eq!(
            MediaUrl::parse("sermons/audio/42.mp3").unwrap_err(),
            MediaUrlError::Invalid
        );
    }

    #[test]
    fn media_url_rejects_file_scheme() {
        assert_eq!(
            MediaUrl::parse("file:///tmp/audio.mp3").unwrap_err(),
            MediaUrlError::UnsupportedScheme
        );
    }
}
