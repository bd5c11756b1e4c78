use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use client::{LoadError, LoadedQuiz, ScoringMode, SubmissionClient, SubmitError};
use readquiz_core::Clock;
use readquiz_core::model::{
    AnswerKey, AnswerSelections, ChoiceId, Passage, PassageId, Question, QuestionId, QuestionSet,
    ScoreResult,
};

use super::progress::SessionProgress;
use crate::error::SessionError;

//
// ─── STATUS ────────────────────────────────────────────────────────────────────
//

/// Lifecycle states of a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Content is being fetched; the session is not interactive yet.
    Loading,
    /// Interactive: answering, navigation, and submission are permitted.
    Ready,
    /// A submission is in flight; mutations are rejected until it settles.
    Submitting,
    /// Terminal for the attempt; only `reset` is permitted.
    Completed,
    /// Loading failed. Terminal: the session holds the error and nothing else.
    Failed,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionStatus::Loading => "loading",
            SessionStatus::Ready => "ready",
            SessionStatus::Submitting => "submitting",
            SessionStatus::Completed => "completed",
            SessionStatus::Failed => "failed",
        };
        f.write_str(name)
    }
}

//
// ─── OUTCOME ───────────────────────────────────────────────────────────────────
//

/// How a session reached `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizOutcome {
    /// The submission was scored.
    Scored(ScoreResult),
    /// The passage has no questions, so there was nothing to take.
    NoQuestions,
}

//
// ─── REQUEST TAG ───────────────────────────────────────────────────────────────
//

/// Pairs an asynchronous completion with the request that opened it.
///
/// A completion bearing any tag other than the session's pending one is
/// stale: the session was reset or the result was already applied while the
/// operation was in flight. Stale completions are discarded, never applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTag(Uuid);

impl RequestTag {
    fn next() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Snapshot handed out by [`QuizSession::begin_submit`].
///
/// Carries everything the submission client needs, detached from the session
/// so the request can run while the session stays borrowable.
#[derive(Debug, Clone)]
pub struct SubmitRequest {
    tag: RequestTag,
    passage_id: PassageId,
    selections: AnswerSelections,
}

impl SubmitRequest {
    #[must_use]
    pub fn tag(&self) -> RequestTag {
        self.tag
    }

    #[must_use]
    pub fn passage_id(&self) -> PassageId {
        self.passage_id
    }

    #[must_use]
    pub fn selections(&self) -> &AnswerSelections {
        &self.selections
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// State machine for one attempt at a passage's quiz.
///
/// Owns the loaded content, the user's selections, and the navigation
/// position. The submission strategy is injected at construction and never
/// inspected beyond the mode it advertises. Loading and submitting run in
/// two phases (`begin_*` opens a tagged request, `complete_*` applies its
/// result) so a caller can keep rendering the session while a request is in
/// flight.
pub struct QuizSession {
    passage_id: PassageId,
    client: Arc<dyn SubmissionClient>,
    clock: Clock,
    status: SessionStatus,
    passage: Option<Passage>,
    questions: QuestionSet,
    answer_key: Option<AnswerKey>,
    selections: AnswerSelections,
    current_index: usize,
    outcome: Option<QuizOutcome>,
    last_error: Option<SessionError>,
    pending: Option<RequestTag>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Creates a session in `Loading` and returns the tag identifying its
    /// load request.
    #[must_use]
    pub fn begin(
        passage_id: PassageId,
        submission_client: Arc<dyn SubmissionClient>,
        clock: Clock,
    ) -> (Self, RequestTag) {
        let tag = RequestTag::next();
        let session = Self {
            passage_id,
            client: submission_client,
            clock,
            status: SessionStatus::Loading,
            passage: None,
            questions: QuestionSet::empty(),
            answer_key: None,
            selections: AnswerSelections::new(),
            current_index: 0,
            outcome: None,
            last_error: None,
            pending: Some(tag),
            started_at: None,
            completed_at: None,
        };
        (session, tag)
    }

    // ─── Accessors ───

    #[must_use]
    pub fn passage_id(&self) -> PassageId {
        self.passage_id
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub fn passage(&self) -> Option<&Passage> {
        self.passage.as_ref()
    }

    #[must_use]
    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    #[must_use]
    pub fn selections(&self) -> &AnswerSelections {
        &self.selections
    }

    /// Which scoring strategy this session submits through.
    #[must_use]
    pub fn scoring_mode(&self) -> ScoringMode {
        self.client.mode()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// 1-based number of the current question, for display.
    #[must_use]
    pub fn display_number(&self) -> usize {
        self.current_index + 1
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.question_at(self.current_index)
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// The recorded choice for a question, if any.
    #[must_use]
    pub fn selection_for(&self, question: QuestionId) -> Option<ChoiceId> {
        self.selections.choice_for(question)
    }

    #[must_use]
    pub fn is_answered(&self, question: QuestionId) -> bool {
        self.selections.is_answered(question)
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.questions.len();
        let answered = self.selections.len();
        SessionProgress {
            total,
            answered,
            remaining: total.saturating_sub(answered),
            is_complete: total > 0 && answered >= total,
        }
    }

    #[must_use]
    pub fn outcome(&self) -> Option<QuizOutcome> {
        self.outcome
    }

    /// The score, once the session completed through a scored submission.
    #[must_use]
    pub fn score(&self) -> Option<ScoreResult> {
        match self.outcome {
            Some(QuizOutcome::Scored(score)) => Some(score),
            _ => None,
        }
    }

    /// The error recorded by the most recent failed load or submission.
    ///
    /// A failed submission leaves the session `Ready` with this set; the
    /// next successful submission clears it.
    #[must_use]
    pub fn last_error(&self) -> Option<&SessionError> {
        self.last_error.as_ref()
    }

    /// The local answer key, readable only after a scored completion.
    ///
    /// `None` in every other state, so correct answers cannot reach the
    /// presentation layer while the quiz is still in progress.
    #[must_use]
    pub fn answer_key(&self) -> Option<&AnswerKey> {
        match (self.status, self.outcome) {
            (SessionStatus::Completed, Some(QuizOutcome::Scored(_))) => self.answer_key.as_ref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    // ─── Loading ───

    /// Applies the result of the load request identified by `tag`.
    ///
    /// A loaded quiz with questions makes the session `Ready`; one without
    /// questions completes it immediately with [`QuizOutcome::NoQuestions`];
    /// a load error lands it in `Failed`. Returns `false`, changing
    /// nothing, when the tag is stale.
    pub fn complete_load(&mut self, tag: RequestTag, result: Result<LoadedQuiz, LoadError>) -> bool {
        if self.status != SessionStatus::Loading || self.pending != Some(tag) {
            tracing::warn!(
                target: "readquiz.session",
                passage_id = %self.passage_id,
                status = %self.status,
                "discarding stale load completion"
            );
            return false;
        }
        self.pending = None;

        match result {
            Ok(quiz) if quiz.questions.is_empty() => {
                self.passage = Some(quiz.passage);
                self.outcome = Some(QuizOutcome::NoQuestions);
                self.completed_at = Some(self.clock.now());
                self.set_status(SessionStatus::Completed);
            }
            Ok(quiz) => {
                self.passage = Some(quiz.passage);
                self.questions = quiz.questions;
                self.answer_key = quiz.answer_key;
                self.started_at = Some(self.clock.now());
                self.set_status(SessionStatus::Ready);
            }
            Err(err) => {
                self.last_error = Some(SessionError::Load(err));
                self.set_status(SessionStatus::Failed);
            }
        }
        true
    }

    // ─── Answering ───

    /// Records (or overwrites) the choice for a question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotInteractive` unless the session is `Ready`,
    /// `SessionError::UnknownQuestion` or `SessionError::UnknownChoice` when
    /// the pair is not part of the loaded set. State is unchanged on error.
    pub fn select_answer(
        &mut self,
        question: QuestionId,
        choice: ChoiceId,
    ) -> Result<(), SessionError> {
        self.require_ready()?;
        let Some(target) = self.questions.by_id(question) else {
            return Err(SessionError::UnknownQuestion(question));
        };
        if !target.has_choice(choice) {
            return Err(SessionError::UnknownChoice { question, choice });
        }
        self.selections.select(question, choice);
        Ok(())
    }

    // ─── Navigation ───

    /// Jumps to the question at `index`, clamping into the valid range.
    ///
    /// Random access is free: any question can be revisited at any time.
    /// Ignored unless the session is `Ready`.
    pub fn go_to(&mut self, index: usize) {
        if self.status != SessionStatus::Ready || self.questions.is_empty() {
            return;
        }
        self.current_index = index.min(self.questions.len() - 1);
    }

    /// Steps forward one question, staying on the last one at the end.
    pub fn next_question(&mut self) {
        if self.status != SessionStatus::Ready || self.questions.is_empty() {
            return;
        }
        self.current_index = (self.current_index + 1).min(self.questions.len() - 1);
    }

    /// Steps back one question, staying on the first one at the start.
    pub fn previous_question(&mut self) {
        if self.status != SessionStatus::Ready {
            return;
        }
        self.current_index = self.current_index.saturating_sub(1);
    }

    // ─── Submission ───

    /// Checks completeness and opens a submission, returning the snapshot
    /// to hand to the submission client. The session shows `Submitting`
    /// until the matching [`complete_submit`](Self::complete_submit).
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadySubmitting` while a submission is in
    /// flight, `SessionError::NotInteractive` outside `Ready`, and
    /// `SessionError::IncompleteAnswers` when questions remain unanswered.
    /// The session stays `Ready` and keeps its selections on error.
    pub fn begin_submit(&mut self) -> Result<SubmitRequest, SessionError> {
        if self.status == SessionStatus::Submitting {
            return Err(SessionError::AlreadySubmitting);
        }
        self.require_ready()?;

        let unanswered = self.questions.len().saturating_sub(self.selections.len());
        if unanswered > 0 {
            return Err(SessionError::IncompleteAnswers { unanswered });
        }

        let tag = RequestTag::next();
        self.pending = Some(tag);
        self.set_status(SessionStatus::Submitting);
        Ok(SubmitRequest {
            tag,
            passage_id: self.passage_id,
            selections: self.selections.clone(),
        })
    }

    /// Applies the result of the submission identified by `tag`.
    ///
    /// Success completes the session with the score; failure returns it to
    /// `Ready` with `last_error` set and every selection preserved, so the
    /// user can retry without re-answering. Returns `false`, changing
    /// nothing, when the tag is stale.
    pub fn complete_submit(
        &mut self,
        tag: RequestTag,
        result: Result<ScoreResult, SubmitError>,
    ) -> bool {
        if self.status != SessionStatus::Submitting || self.pending != Some(tag) {
            tracing::warn!(
                target: "readquiz.session",
                passage_id = %self.passage_id,
                status = %self.status,
                "discarding stale submit completion"
            );
            return false;
        }
        self.pending = None;

        match result {
            Ok(score) => {
                tracing::debug!(
                    target: "readquiz.session",
                    passage_id = %self.passage_id,
                    score = %score,
                    "quiz scored"
                );
                self.outcome = Some(QuizOutcome::Scored(score));
                self.last_error = None;
                self.completed_at = Some(self.clock.now());
                self.set_status(SessionStatus::Completed);
            }
            Err(err) => {
                self.last_error = Some(SessionError::Submit(err));
                self.set_status(SessionStatus::Ready);
            }
        }
        true
    }

    /// Validates, submits through the injected client, and applies the
    /// outcome in one call.
    ///
    /// # Errors
    ///
    /// Everything [`begin_submit`](Self::begin_submit) reports, plus the
    /// submission client's failure, which also lands in `last_error` while
    /// the session returns to `Ready`.
    pub async fn submit(&mut self) -> Result<ScoreResult, SessionError> {
        let request = self.begin_submit()?;
        let submission_client = Arc::clone(&self.client);
        let result = submission_client
            .submit(request.passage_id(), request.selections())
            .await;

        let applied = self.complete_submit(request.tag(), result.clone());
        debug_assert!(applied, "a held session cannot race its own submission");

        result.map_err(SessionError::Submit)
    }

    // ─── Reset ───

    /// Clears selections and returns to `Ready` for another attempt,
    /// reusing the already-loaded questions without refetching.
    ///
    /// Permitted from `Completed` (retake) and `Ready` (start over). A
    /// questionless session has nothing to retake and stays completed.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotInteractive` in any other state.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        match self.status {
            SessionStatus::Ready | SessionStatus::Completed => {}
            other => return Err(SessionError::NotInteractive(other)),
        }
        if self.questions.is_empty() {
            return Ok(());
        }

        self.selections.clear();
        self.current_index = 0;
        self.outcome = None;
        self.last_error = None;
        self.pending = None;
        self.completed_at = None;
        self.started_at = Some(self.clock.now());
        self.set_status(SessionStatus::Ready);
        Ok(())
    }

    // ─── Internals ───

    fn require_ready(&self) -> Result<(), SessionError> {
        match self.status {
            SessionStatus::Ready => Ok(()),
            other => Err(SessionError::NotInteractive(other)),
        }
    }

    fn set_status(&mut self, next: SessionStatus) {
        tracing::debug!(
            target: "readquiz.session",
            passage_id = %self.passage_id,
            from = %self.status,
            to = %next,
            "session status change"
        );
        self.status = next;
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("passage_id", &self.passage_id)
            .field("status", &self.status)
            .field("questions_len", &self.questions.len())
            .field("selections_len", &self.selections.len())
            .field("current_index", &self.current_index)
            .field("outcome", &self.outcome)
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
