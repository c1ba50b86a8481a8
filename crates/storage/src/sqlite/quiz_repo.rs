use portal_core::model::{Quiz, QuizId};

use super::SqliteRepository;
use super::mapping::{i64_from_u64, map_quiz_row, ser, u64_from_i64};
use crate::repository::{NewQuizRecord, QuizRepository, StorageError};

#[async_trait::async_trait]
impl QuizRepository for SqliteRepository {
    async fn insert_quiz(&self, quiz: NewQuizRecord) -> Result<QuizId, StorageError> {
        let questions = serde_json::to_string(&quiz.questions).map_err(ser)?;

        let res = sqlx::query(
            r"
            INSERT INTO quizzes (topic, difficulty, questions, created_at)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(quiz.topic)
        .bind(quiz.difficulty)
        .bind(questions)
        .bind(quiz.created_at)
        .execute(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(QuizId::new(u64_from_i64("id", res.last_insert_rowid())?))
    }

    async fn list_recent_quizzes(&self, limit: u32) -> Result<Vec<Quiz>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, topic, difficulty, questions, created_at
            FROM quizzes
            ORDER BY created_at DESC, id DESC
            LIMIT ?1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut quizzes = Vec::with_capacity(rows.len());
        for row in rows {
            quizzes.push(map_quiz_row(&row)?);
        }
        Ok(quizzes)
    }

    async fn get_quiz(&self, id: QuizId) -> Result<Option<Quiz>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, topic, difficulty, questions, created_at
            FROM quizzes WHERE id = ?1
            ",
        )
        .bind(i64_from_u64("id", id.value())?)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        match row {
            Some(row) => map_quiz_row(&row).map(Some),
            None => Ok(None),
        }
    }

    async fn delete_quiz(&self, id: QuizId) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM quizzes WHERE id = ?1")
            .bind(i64_from_u64("id", id.value())?)
            .execute(self.pool())
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
