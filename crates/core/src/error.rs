use thiserror::Error;

use crate::model::content::{MediaUrlError, TextError};
use crate::model::quiz::QuizError;
use crate::model::session::QuizSessionError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    TextValidation(#[from] TextError),
    #[error(transparent)]
    MediaValidation(#[from] MediaUrlError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Session(#[from] QuizSessionError),
}
