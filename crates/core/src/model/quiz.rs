use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::QuizId;

/// Fewest options a question may carry.
pub const MIN_OPTIONS: usize = 2;
/// Most options a question may carry.
pub const MAX_OPTIONS: usize = 8;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz topic cannot be empty")]
    EmptyTopic,

    #[error("invalid difficulty value: {0}")]
    InvalidDifficulty(String),

    #[error("question text cannot be empty")]
    EmptyQuestionText,

    #[error("question must have between {MIN_OPTIONS} and {MAX_OPTIONS} options, got {len}")]
    InvalidOptionCount { len: usize },

    #[error("option {index} cannot be empty")]
    EmptyOption { index: usize },

    #[error("correct index {correct_index} is out of range for {len} options")]
    CorrectIndexOutOfRange { correct_index: usize, len: usize },
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Difficulty band of a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Number of difficulty bands, shown on the library stats strip.
pub const DIFFICULTY_LEVELS: usize = 3;

impl Difficulty {
    /// Parse the stored string form.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidDifficulty` for unknown values.
    pub fn parse(s: &str) -> Result<Self, QuizError> {
        match s {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(QuizError::InvalidDifficulty(other.to_owned())),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single multiple-choice question.
///
/// Shape is validated at construction, so a stored or generated question
/// that reaches a session can always be indexed safely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    text: String,
    options: Vec<String>,
    correct_index: usize,
}

impl QuizQuestion {
    /// Creates a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` when the text is empty, the option count is
    /// outside `MIN_OPTIONS..=MAX_OPTIONS`, any option is empty, or
    /// `correct_index` does not address an option.
    pub fn new(
        text: impl Into<String>,
        options: Vec<String>,
        correct_index: usize,
    ) -> Result<Self, QuizError> {
        let text = text.into().trim().to_owned();
        if text.is_empty() {
            return Err(QuizError::EmptyQuestionText);
        }

        let len = options.len();
        if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&len) {
            return Err(QuizError::InvalidOptionCount { len });
        }

        let mut trimmed = Vec::with_capacity(len);
        for (index, option) in options.into_iter().enumerate() {
            let option = option.trim().to_owned();
            if option.is_empty() {
                return Err(QuizError::EmptyOption { index });
            }
            trimmed.push(option);
        }

        if correct_index >= len {
            return Err(QuizError::CorrectIndexOutOfRange { correct_index, len });
        }

        Ok(Self {
            text,
            options: trimmed,
            correct_index,
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    /// True when `option_index` addresses the correct option.
    #[must_use]
    pub fn is_correct(&self, option_index: usize) -> bool {
        option_index == self.correct_index
    }
}

//
// ─── QUIZ ──────────────────────────────────────────────────────────────────────
//

/// A quiz in the library: a topic, a difficulty and an ordered question
/// list. Immutable once constructed; a session never mutates its quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    id: QuizId,
    topic: String,
    difficulty: Difficulty,
    questions: Vec<QuizQuestion>,
    created_at: DateTime<Utc>,
}

impl Quiz {
    /// Creates a new quiz.
    ///
    /// An empty question list is permitted here (an authored shell may be
    /// saved before its questions); playing such a quiz is rejected at
    /// session start.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyTopic` if the topic is empty after
    /// trimming.
    pub fn new(
        id: QuizId,
        topic: impl Into<String>,
        difficulty: Difficulty,
        questions: Vec<QuizQuestion>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, QuizError> {
        let topic = topic.into().trim().to_owned();
        if topic.is_empty() {
            return Err(QuizError::EmptyTopic);
        }

        Ok(Self {
            id,
            topic,
            difficulty,
            questions,
            created_at,
        })
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> QuizId {
        self.id
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn options(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("option {i}")).collect()
    }

    #[test]
    fn question_rejects_empty_text() {
        let err = QuizQuestion::new("  ", options(4), 0).unwrap_err();
        assert_eq!(err, QuizError::EmptyQuestionText);
    }

    #[test]
    fn question_rejects_single_option() {
        let err = QuizQuestion::new("Who built the ark?", options(1), 0).unwrap_err();
        assert_eq!(err, QuizError::InvalidOptionCount { len: 1 });
    }

    #[test]
    fn question_rejects_blank_option() {
        let mut opts = options(4);
        opts[2] = "   ".into();
        let err = QuizQuestion::new("Who built the ark?", opts, 0).unwrap_err();
        assert_eq!(err, QuizError::EmptyOption { index: 2 });
    }

    #[test]
    fn question_rejects_out_of_range_correct_index() {
        let err = QuizQuestion::new("Who built the ark?", options(4), 4).unwrap_err();
        assert_eq!(
            err,
            QuizError::CorrectIndexOutOfRange {
                correct_index: 4,
                len: 4
            }
        );
    }

    #[test]
    fn question_checks_answers() {
        let q = QuizQuestion::new("Who built the ark?", options(4), 2).unwrap();
        assert!(q.is_correct(2));
        assert!(!q.is_correct(0));
    }

    #[test]
    fn difficulty_round_trips() {
        assert_eq!(Difficulty::parse("hard").unwrap(), Difficulty::Hard);
        assert_eq!(
            Difficulty::parse(Difficulty::Easy.as_str()).unwrap(),
            Difficulty::Easy
        );
        assert!(Difficulty::parse("expert").is_err());
    }

    #[test]
    fn quiz_rejects_empty_topic() {
        let err = Quiz::new(QuizId::new(1), " ", Difficulty::Easy, vec![], fixed_now())
            .unwrap_err();
        assert_eq!(err, QuizError::EmptyTopic);
    }

    #[test]
    fn quiz_keeps_question_order() {
        let questions = vec![
            QuizQuestion::new("First?", options(4), 0).unwrap(),
            QuizQuestion::new("Second?", options(4), 1).unwrap(),
        ];
        let quiz = Quiz::new(
            QuizId::new(1),
            "Genesis",
            Difficulty::Medium,
            questions,
            fixed_now(),
        )
        .unwrap();

        assert_eq!(quiz.question_count(), 2);
        assert_eq!(quiz.questions()[0].text(), "First?");
        assert_eq!(quiz.questions()[1].text(), "Second?");
    }
}
