use thiserror::Error;

use crate::model::{PassageError, QuestionError, QuestionSetError, ScoreError};

/// Any validation failure raised while building domain values.
///
/// Lets callers that assemble a whole quiz from raw parts use one error
/// type instead of one per constructor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Passage(#[from] PassageError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    QuestionSet(#[from] QuestionSetError),
    #[error(transparent)]
    Score(#[from] ScoreError),
}
