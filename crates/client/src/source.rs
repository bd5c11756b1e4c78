use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

use readquiz_core::model::{AnswerKey, AnswerSelections, Passage, PassageId, QuestionSet, ScoreResult};

/// Errors surfaced while loading a quiz.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LoadError {
    #[error("passage not found")]
    NotFound,

    #[error("network error: {0}")]
    Network(String),
}

/// Errors surfaced while submitting answers for scoring.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SubmitError {
    #[error("scoring request failed: {0}")]
    Network(String),

    #[error("submission rejected: {0}")]
    Validation(String),
}

/// Which scoring strategy a submission client implements.
///
/// Display metadata only: a session picks its client at construction and
/// never branches on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringMode {
    /// Scoring is delegated to the backend.
    Remote,
    /// Scoring runs locally against an embedded answer key.
    Local,
}

impl fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringMode::Remote => f.write_str("remote"),
            ScoringMode::Local => f.write_str("local"),
        }
    }
}

/// Everything a session needs to start working on one passage.
#[derive(Debug, Clone)]
pub struct LoadedQuiz {
    pub passage: Passage,
    pub questions: QuestionSet,
    /// Present only for locally-scored quizzes. The session keeps it
    /// private until a score exists, so correct answers never reach the
    /// presentation layer mid-quiz.
    pub answer_key: Option<AnswerKey>,
}

/// Source contract for passages and their question sets.
#[async_trait]
pub trait QuizLoader: Send + Sync {
    /// Fetch the passage and its questions.
    ///
    /// An empty question set is a valid result meaning the passage has no
    /// quiz, not an error.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::NotFound` if the passage does not exist, or
    /// `LoadError::Network` for transport and backend failures.
    async fn load(&self, passage_id: PassageId) -> Result<LoadedQuiz, LoadError>;
}

/// Scoring contract: accepts a complete set of selections, returns a score.
#[async_trait]
pub trait SubmissionClient: Send + Sync {
    /// Score the selections for the passage.
    ///
    /// # Errors
    ///
    /// Returns `SubmitError::Validation` if the submission itself is
    /// rejected, or `SubmitError::Network` for transport and backend
    /// failures.
    async fn submit(
        &self,
        passage_id: PassageId,
        selections: &AnswerSelections,
    ) -> Result<ScoreResult, SubmitError>;

    /// Which strategy this client implements.
    fn mode(&self) -> ScoringMode;
}
