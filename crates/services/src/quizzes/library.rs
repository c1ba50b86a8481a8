use std::sync::Arc;

use portal_core::model::{Difficulty, Quiz, QuizId, QuizQuestion, QuizSession};
use storage::repository::{NewQuizRecord, QuizRepository};

use super::view::{LibraryStats, QuizListItem};
use crate::Clock;
use crate::error::QuizLibraryError;

/// Default number of quizzes fetched for the library view.
const LIBRARY_LIMIT: u32 = 100;

/// Orchestrates the quiz library: listing, authoring and starting sessions.
///
/// A started session is handed to the caller by value; the attempt lives
/// and dies in memory and is never written back.
#[derive(Clone)]
pub struct QuizLibraryService {
    clock: Clock,
    quizzes: Arc<dyn QuizRepository>,
}

impl QuizLibraryService {
    #[must_use]
    pub fn new(clock: Clock, quizzes: Arc<dyn QuizRepository>) -> Self {
        Self { clock, quizzes }
    }

    /// Library entries newest-first.
    ///
    /// # Errors
    ///
    /// Returns `QuizLibraryError::Storage` if repository access fails.
    pub async fn library(&self) -> Result<Vec<QuizListItem>, QuizLibraryError> {
        let quizzes = self.quizzes.list_recent_quizzes(LIBRARY_LIMIT).await?;
        Ok(quizzes.iter().map(QuizListItem::from_quiz).collect())
    }

    /// Aggregate numbers for the library header.
    ///
    /// # Errors
    ///
    /// Returns `QuizLibraryError::Storage` if repository access fails.
    pub async fn stats(&self) -> Result<LibraryStats, QuizLibraryError> {
        let quizzes = self.quizzes.list_recent_quizzes(LIBRARY_LIMIT).await?;
        Ok(LibraryStats::from_quizzes(&quizzes))
    }

    /// Fetch a quiz and begin an in-memory session over it.
    ///
    /// # Errors
    ///
    /// Returns `QuizLibraryError::UnknownQuiz` if the quiz does not exist,
    /// `QuizLibraryError::Session` if it cannot be played (no questions),
    /// or `QuizLibraryError::Storage` for repository failures.
    pub async fn start_session(&self, id: QuizId) -> Result<QuizSession, QuizLibraryError> {
        let quiz = self
            .quizzes
            .get_quiz(id)
            .await?
            .ok_or(QuizLibraryError::UnknownQuiz(id.value()))?;
        Ok(QuizSession::start(quiz)?)
    }

    /// Store an authored quiz and return its id.
    ///
    /// # Errors
    ///
    /// Returns `QuizLibraryError::Quiz` for validation failures and
    /// `QuizLibraryError::Storage` if persistence fails.
    pub async fn add_quiz(
        &self,
        topic: impl Into<String>,
        difficulty: Difficulty,
        questions: Vec<QuizQuestion>,
    ) -> Result<QuizId, QuizLibraryError> {
        let now = self.clock.now();
        let quiz = Quiz::new(QuizId::new(1), topic, difficulty, questions, now)?;
        let id = self
            .quizzes
            .insert_quiz(NewQuizRecord::from_quiz(&quiz))
            .await?;
        tracing::info!(quiz = %id, topic = quiz.topic(), "quiz added to library");
        Ok(id)
    }

    /// Remove a quiz from the library.
    ///
    /// # Errors
    ///
    /// Returns `QuizLibraryError::Storage` if the quiz does not exist or
    /// deletion fails.
    pub async fn delete_quiz(&self, id: QuizId) -> Result<(), QuizLibraryError> {
        self.quizzes.delete_quiz(id).await?;
        tracing::info!(quiz = %id, "quiz deleted");
        Ok(())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::time::{fixed_clock, fixed_now};
    use storage::repository::InMemoryRepository;

    fn service() -> QuizLibraryService {
        QuizLibraryService::new(fixed_clock(), Arc::new(InMemoryRepository::new()))
    }

    fn questions(correct: &[usize]) -> Vec<QuizQuestion> {
        correct
            .iter()
            .map(|&c| {
                QuizQuestion::new(
                    "Which one?",
                    vec!["A".into(), "B".into(), "C".into(), "D".into()],
                    c,
                )
                .unwrap()
            })
            .collect()
    }

    #[tokio::test]
    async fn add_then_list_and_play() {
        let service = service();
        let id = service
            .add_quiz("Gospels", Difficulty::Easy, questions(&[1, 0]))
            .await
            .unwrap();

        let items = service.library().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, id);
        assert_eq!(items[0].question_count, 2);
        assert_eq!(items[0].created_at, fixed_now());

        let stats = service.stats().await.unwrap();
        assert_eq!(stats.quiz_count, 1);
        assert_eq!(stats.question_count, 2);

        let mut session = service.start_session(id).await.unwrap();
        session.submit_answer(1).unwrap();
        assert!(session.advance());
        session.submit_answer(2).unwrap();
        assert!(session.advance());
        let result = session.result().unwrap();
        assert_eq!(result.score(), 1);
    }

    #[tokio::test]
    async fn starting_a_missing_quiz_fails() {
        let service = service();
        let err = service.start_session(QuizId::new(42)).await.unwrap_err();
        assert!(matches!(err, QuizLibraryError::UnknownQuiz(42)));
    }

    #[tokio::test]
    async fn starting_an_empty_quiz_is_rejected() {
        let service = service();
        let id = service
            .add_quiz("Empty Shell", Difficulty::Hard, Vec::new())
            .await
            .unwrap();
        let err = service.start_session(id).await.unwrap_err();
        assert!(matches!(err, QuizLibraryError::Session(_)));
    }

    #[tokio::test]
    async fn delete_removes_from_library() {
        let service = service();
        let id = service
            .add_quiz("Gospels", Difficulty::Easy, questions(&[0]))
            .await
            .unwrap();
        service.delete_quiz(id).await.unwrap();
        assert!(service.library().await.unwrap().is_empty());
    }
}
