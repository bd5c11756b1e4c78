//! Shared error types for the services crate.

use thiserror::Error;

use client::{LoadError, SubmitError};
use readquiz_core::model::{ChoiceId, QuestionId};

use crate::session::SessionStatus;

/// Errors emitted by quiz sessions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    /// A selection referenced a question outside the loaded set.
    #[error("unknown question {0}")]
    UnknownQuestion(QuestionId),

    /// A selection referenced a choice the question does not offer.
    #[error("choice {choice} does not belong to question {question}")]
    UnknownChoice {
        question: QuestionId,
        choice: ChoiceId,
    },

    /// Submission was attempted while questions remain unanswered.
    #[error("{unanswered} unanswered question(s) remain")]
    IncompleteAnswers { unanswered: usize },

    /// A submission is already in flight for this session.
    #[error("a submission is already in flight")]
    AlreadySubmitting,

    /// The operation is not permitted while the session is in this state.
    #[error("operation not permitted while the session is {0}")]
    NotInteractive(SessionStatus),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Submit(#[from] SubmitError),
}
