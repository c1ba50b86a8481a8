use chrono::{DateTime, Utc};

use portal_core::model::{Difficulty, Quiz, QuizId, quiz::DIFFICULTY_LEVELS};

/// Presentation-agnostic list item for the quiz library.
///
/// This is intentionally **not** a UI view-model: no pre-formatted strings
/// and no localization assumptions. The rendering layer decides how topic,
/// difficulty and dates are shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizListItem {
    pub id: QuizId,
    pub topic: String,
    pub difficulty: Difficulty,
    pub question_count: usize,
    pub created_at: DateTime<Utc>,
}

impl QuizListItem {
    #[must_use]
    pub fn from_quiz(quiz: &Quiz) -> Self {
        Self {
            id: quiz.id(),
            topic: quiz.topic().to_owned(),
            difficulty: quiz.difficulty(),
            question_count: quiz.question_count(),
            created_at: quiz.created_at(),
        }
    }
}

/// Aggregate numbers for the library header strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibraryStats {
    pub quiz_count: usize,
    pub question_count: usize,
    pub difficulty_levels: usize,
}

impl LibraryStats {
    #[must_use]
    pub fn from_quizzes(quizzes: &[Quiz]) -> Self {
        Self {
            quiz_count: quizzes.len(),
            question_count: quizzes.iter().map(Quiz::question_count).sum(),
            difficulty_levels: DIFFICULTY_LEVELS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::model::QuizQuestion;
    use portal_core::time::fixed_now;

    fn quiz(id: u64, questions: usize) -> Quiz {
        let questions = (0..questions)
            .map(|i| {
                QuizQuestion::new(
                    format!("Question {i}?"),
                    vec!["A".into(), "B".into(), "C".into(), "D".into()],
                    0,
                )
                .unwrap()
            })
            .collect();
        Quiz::new(
            QuizId::new(id),
            "Topic",
            Difficulty::Easy,
            questions,
            fixed_now(),
        )
        .unwrap()
    }

    #[test]
    fn stats_sum_question_counts() {
        let quizzes = vec![quiz(1, 5), quiz(2, 3)];
        let stats = LibraryStats::from_quizzes(&quizzes);
        assert_eq!(stats.quiz_count, 2);
        assert_eq!(stats.question_count, 8);
        assert_eq!(stats.difficulty_levels, 3);
    }

    #[test]
    fn list_item_mirrors_quiz_fields() {
        let item = QuizListItem::from_quiz(&quiz(7, 4));
        assert_eq!(item.id, QuizId::new(7));
        assert_eq!(item.question_count, 4);
    }
}
