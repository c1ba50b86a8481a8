use std::fmt;

use thiserror::Error;

use crate::model::quiz::{Quiz, QuizQuestion};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizSessionError {
    #[error("quiz has no questions")]
    NoQuestions,

    #[error("quiz is not finished")]
    NotFinished,
}

//
// ─── RESULT TIER ───────────────────────────────────────────────────────────────
//

/// Qualitative band derived from the final percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultTier {
    Perfect,
    Excellent,
    Good,
    NeedsImprovement,
}

impl ResultTier {
    /// Tier for a percentage in `0..=100`: 100 is perfect, 80 and above
    /// excellent, 60 and above good, anything lower needs improvement.
    #[must_use]
    pub fn from_percentage(percentage: u8) -> Self {
        match percentage {
            100.. => Self::Perfect,
            80..=99 => Self::Excellent,
            60..=79 => Self::Good,
            _ => Self::NeedsImprovement,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ResultTier::Perfect => "perfect",
            ResultTier::Excellent => "excellent",
            ResultTier::Good => "good",
            ResultTier::NeedsImprovement => "needs improvement",
        }
    }
}

//
// ─── RESULT ────────────────────────────────────────────────────────────────────
//

/// Final outcome of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizResult {
    score: u32,
    total: u32,
}

impl QuizResult {
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Score as a percentage of the total, rounded half-up.
    #[must_use]
    pub fn percentage(&self) -> u8 {
        let ratio = f64::from(self.score) / f64::from(self.total) * 100.0;
        // f64::round is half-away-from-zero, which is half-up for a
        // non-negative ratio.
        let rounded = ratio.round();
        u8::try_from(rounded as i64).unwrap_or(100)
    }

    #[must_use]
    pub fn tier(&self) -> ResultTier {
        ResultTier::from_percentage(self.percentage())
    }
}

//
// ─── FEEDBACK ──────────────────────────────────────────────────────────────────
//

/// Reveal shown after a submission: what was picked, what was right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub selected: usize,
    pub correct_index: usize,
    pub is_correct: bool,
}

/// Snapshot of where a session stands, for progress displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    /// 1-based number of the question on screen (equals `total` once
    /// finished).
    pub position: usize,
    pub total: usize,
    pub score: u32,
    pub is_finished: bool,
}

impl SessionProgress {
    /// Portion of the quiz reached, as a rounded percentage.
    #[must_use]
    pub fn percent_complete(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let ratio = self.position as f64 / self.total as f64 * 100.0;
        u8::try_from(ratio.round() as i64).unwrap_or(100)
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Where the session currently is. A selection exists only inside
/// `InProgress`, so "answered but nothing selected" cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    InProgress {
        index: usize,
        selected: Option<usize>,
    },
    Finished,
}

/// One user's attempt at one quiz, held only in memory.
///
/// Drives the answer → reveal → advance progression over the quiz's
/// ordered questions. Nothing is persisted: dropping the session is the
/// reset operation, and no record of the attempt survives it.
///
/// Transitions that arrive at the wrong time (a second click on an option,
/// an advance before answering) are ignored rather than treated as errors;
/// they are ordinary artifacts of UI event timing.
pub struct QuizSession {
    quiz: Quiz,
    score: u32,
    phase: Phase,
}

impl QuizSession {
    /// Starts a session over the given quiz.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::NoQuestions` if the quiz has no
    /// questions; the session is never created in that case.
    pub fn start(quiz: Quiz) -> Result<Self, QuizSessionError> {
        if quiz.questions().is_empty() {
            return Err(QuizSessionError::NoQuestions);
        }
        Ok(Self {
            quiz,
            score: 0,
            phase: Phase::InProgress {
                index: 0,
                selected: None,
            },
        })
    }

    /// Submit an answer for the current question.
    ///
    /// Returns `None` without changing state when the question is already
    /// answered, the session is finished, or `option_index` does not
    /// address an option. Otherwise records the selection, scores a
    /// correct answer, and returns the reveal.
    pub fn submit_answer(&mut self, option_index: usize) -> Option<AnswerFeedback> {
        let Phase::InProgress { index, selected } = &mut self.phase else {
            return None;
        };
        if selected.is_some() {
            return None;
        }

        let question = &self.quiz.questions()[*index];
        if option_index >= question.options().len() {
            return None;
        }

        *selected = Some(option_index);
        let is_correct = question.is_correct(option_index);
        if is_correct {
            self.score += 1;
        }

        Some(AnswerFeedback {
            selected: option_index,
            correct_index: question.correct_index(),
            is_correct,
        })
    }

    /// Move past an answered question.
    ///
    /// On the last question this finishes the session and freezes the
    /// score. Returns `false` without changing state when the current
    /// question has not been answered or the session is already finished.
    pub fn advance(&mut self) -> bool {
        let Phase::InProgress {
            index,
            selected: Some(_),
        } = self.phase
        else {
            return false;
        };

        if index + 1 >= self.quiz.question_count() {
            self.phase = Phase::Finished;
        } else {
            self.phase = Phase::InProgress {
                index: index + 1,
                selected: None,
            };
        }
        true
    }

    /// Final result of a finished session.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::NotFinished` before the terminal state.
    pub fn result(&self) -> Result<QuizResult, QuizSessionError> {
        if !self.is_finished() {
            return Err(QuizSessionError::NotFinished);
        }
        Ok(QuizResult {
            score: self.score,
            total: u32::try_from(self.quiz.question_count()).unwrap_or(u32::MAX),
        })
    }

    // Accessors
    #[must_use]
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    /// Index of the question on screen, `None` once finished.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        match self.phase {
            Phase::InProgress { index, .. } => Some(index),
            Phase::Finished => None,
        }
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.current_index().map(|i| &self.quiz.questions()[i])
    }

    #[must_use]
    pub fn selected_answer(&self) -> Option<usize> {
        match self.phase {
            Phase::InProgress { selected, .. } => selected,
            Phase::Finished => None,
        }
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        matches!(
            self.phase,
            Phase::InProgress {
                selected: Some(_),
                ..
            }
        )
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished)
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Snapshot for the progress header.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.quiz.question_count();
        let position = match self.phase {
            Phase::InProgress { index, .. } => index + 1,
            Phase::Finished => total,
        };
        SessionProgress {
            position,
            total,
            score: self.score,
            is_finished: self.is_finished(),
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("quiz_id", &self.quiz.id())
            .field("questions", &self.quiz.question_count())
            .field("score", &self.score)
            .field("phase", &self.phase)
            .finish()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ids::QuizId;
    use crate::model::quiz::Difficulty;
    use crate::time::fixed_now;

    fn question(correct: usize) -> QuizQuestion {
        let options = vec!["A".into(), "B".into(), "C".into(), "D".into()];
        QuizQuestion::new("Which one?", options, correct).unwrap()
    }

    fn quiz(correct_indices: &[usize]) -> Quiz {
        let questions = correct_indices.iter().map(|&c| question(c)).collect();
        Quiz::new(
            QuizId::new(1),
            "Gospels",
            Difficulty::Easy,
            questions,
            fixed_now(),
        )
        .unwrap()
    }

    #[test]
    fn start_rejects_empty_quiz() {
        let empty = Quiz::new(QuizId::new(1), "Empty", Difficulty::Easy, vec![], fixed_now())
            .unwrap();
        let err = QuizSession::start(empty).unwrap_err();
        assert_eq!(err, QuizSessionError::NoQuestions);
    }

    #[test]
    fn fresh_session_has_nothing_selected() {
        let session = QuizSession::start(quiz(&[0])).unwrap();
        assert_eq!(session.current_index(), Some(0));
        assert_eq!(session.selected_answer(), None);
        assert!(!session.is_answered());
        assert!(!session.is_finished());
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn n_submits_and_n_advances_reach_finished() {
        let mut session = QuizSession::start(quiz(&[0, 1, 2, 3])).unwrap();
        for _ in 0..4 {
            assert!(session.submit_answer(0).is_some());
            assert!(session.advance());
        }
        assert!(session.is_finished());
    }

    #[test]
    fn score_counts_correct_answers_only() {
        // Correct indices [1, 0, 2], user submits [1, 0, 0].
        let mut session = QuizSession::start(quiz(&[1, 0, 2])).unwrap();
        for answer in [1, 0, 0] {
            session.submit_answer(answer).unwrap();
            session.advance();
        }

        let result = session.result().unwrap();
        assert_eq!(result.score(), 2);
        assert_eq!(result.total(), 3);
        assert_eq!(result.percentage(), 67);
        assert_eq!(result.tier(), ResultTier::Good);
    }

    #[test]
    fn single_correct_answer_is_perfect() {
        let mut session = QuizSession::start(quiz(&[0])).unwrap();
        session.submit_answer(0).unwrap();
        session.advance();

        let result = session.result().unwrap();
        assert_eq!(result.percentage(), 100);
        assert_eq!(result.tier(), ResultTier::Perfect);
    }

    #[test]
    fn double_submit_scores_at_most_once() {
        let mut session = QuizSession::start(quiz(&[0, 0])).unwrap();
        let first = session.submit_answer(0);
        assert!(first.is_some());
        // Rapid second click before the UI disables the options.
        assert!(session.submit_answer(0).is_none());
        assert_eq!(session.score(), 1);
        assert_eq!(session.selected_answer(), Some(0));
    }

    #[test]
    fn submit_cannot_swap_a_revealed_answer() {
        let mut session = QuizSession::start(quiz(&[1, 1])).unwrap();
        session.submit_answer(0).unwrap();
        assert!(session.submit_answer(1).is_none());
        assert_eq!(session.score(), 0);
        assert_eq!(session.selected_answer(), Some(0));
    }

    #[test]
    fn advance_before_answering_is_ignored() {
        let mut session = QuizSession::start(quiz(&[0, 1])).unwrap();
        assert!(!session.advance());
        assert_eq!(session.current_index(), Some(0));
    }

    #[test]
    fn submit_after_finish_is_ignored() {
        let mut session = QuizSession::start(quiz(&[0])).unwrap();
        session.submit_answer(0).unwrap();
        session.advance();
        assert!(session.is_finished());
        assert!(session.submit_answer(0).is_none());
        assert!(!session.advance());
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn out_of_range_option_is_ignored() {
        let mut session = QuizSession::start(quiz(&[0])).unwrap();
        assert!(session.submit_answer(4).is_none());
        assert!(!session.is_answered());
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn result_before_finish_is_rejected() {
        let mut session = QuizSession::start(quiz(&[0, 1])).unwrap();
        assert_eq!(session.result().unwrap_err(), QuizSessionError::NotFinished);
        session.submit_answer(0).unwrap();
        assert_eq!(session.result().unwrap_err(), QuizSessionError::NotFinished);
    }

    #[test]
    fn feedback_reveals_the_correct_option() {
        let mut session = QuizSession::start(quiz(&[2])).unwrap();
        let feedback = session.submit_answer(1).unwrap();
        assert_eq!(
            feedback,
            AnswerFeedback {
                selected: 1,
                correct_index: 2,
                is_correct: false,
            }
        );
    }

    #[test]
    fn percentage_rounds_half_up() {
        // 1/3 -> 33.33 -> 33, 2/3 -> 66.67 -> 67, 5/6 -> 83.33 -> 83.
        let mut s = QuizSession::start(quiz(&[0, 0, 0])).unwrap();
        for answer in [0, 1, 1] {
            s.submit_answer(answer).unwrap();
            s.advance();
        }
        assert_eq!(s.result().unwrap().percentage(), 33);

        let mut s = QuizSession::start(quiz(&[0, 0, 0, 0, 0, 0])).unwrap();
        for answer in [0, 0, 0, 0, 0, 1] {
            s.submit_answer(answer).unwrap();
            s.advance();
        }
        assert_eq!(s.result().unwrap().percentage(), 83);
    }

    #[test]
    fn tier_thresholds() {
        assert_eq!(ResultTier::from_percentage(100), ResultTier::Perfect);
        assert_eq!(ResultTier::from_percentage(99), ResultTier::Excellent);
        assert_eq!(ResultTier::from_percentage(80), ResultTier::Excellent);
        assert_eq!(ResultTier::from_percentage(79), ResultTier::Good);
        assert_eq!(ResultTier::from_percentage(60), ResultTier::Good);
        assert_eq!(ResultTier::from_percentage(59), ResultTier::NeedsImprovement);
        assert_eq!(ResultTier::from_percentage(0), ResultTier::NeedsImprovement);
    }

    #[test]
    fn progress_tracks_position_and_completion() {
        let mut session = QuizSession::start(quiz(&[0, 1])).unwrap();
        let p = session.progress();
        assert_eq!((p.position, p.total), (1, 2));
        assert_eq!(p.percent_complete(), 50);

        session.submit_answer(0).unwrap();
        session.advance();
        let p = session.progress();
        assert_eq!((p.position, p.total), (2, 2));
        assert_eq!(p.percent_complete(), 100);
        assert!(!p.is_finished);

        session.submit_answer(1).unwrap();
        session.advance();
        assert!(session.progress().is_finished);
    }
}
