use std::sync::Arc;

use client::{QuizLoader, ScoringMode, SubmissionClient};
use readquiz_core::Clock;
use readquiz_core::model::PassageId;

use super::service::QuizSession;

/// Orchestrates session start for a fixed loader/client pairing.
///
/// The remote-vs-local decision is made once, here, by choosing which pair
/// to inject; sessions receive the choice ready-made and never branch on it.
#[derive(Clone)]
pub struct QuizService {
    clock: Clock,
    loader: Arc<dyn QuizLoader>,
    submission_client: Arc<dyn SubmissionClient>,
}

impl QuizService {
    #[must_use]
    pub fn new(loader: Arc<dyn QuizLoader>, submission_client: Arc<dyn SubmissionClient>) -> Self {
        Self {
            clock: Clock::default_clock(),
            loader,
            submission_client,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Which scoring strategy started sessions will submit through.
    #[must_use]
    pub fn scoring_mode(&self) -> ScoringMode {
        self.submission_client.mode()
    }

    /// Loads the passage's quiz and hands back the session.
    ///
    /// Load failures do not error here: they land the session in `Failed`
    /// with the detail in `last_error`, which is the state the caller
    /// renders recovery from. A passage without questions comes back
    /// already completed.
    pub async fn start_session(&self, passage_id: PassageId) -> QuizSession {
        tracing::debug!(
            target: "readquiz.session",
            passage_id = %passage_id,
            mode = %self.scoring_mode(),
            "starting quiz session"
        );

        let (mut session, tag) = QuizSession::begin(
            passage_id,
            Arc::clone(&self.submission_client),
            self.clock,
        );
        let result = self.loader.load(passage_id).await;
        let applied = session.complete_load(tag, result);
        debug_assert!(applied, "a fresh session cannot have a stale load tag");
        session
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use client::FixtureQuizClient;
    use readquiz_core::time::fixed_clock;

    use crate::error::SessionError;
    use crate::session::SessionStatus;

    fn build_service() -> QuizService {
        let fixture = Arc::new(FixtureQuizClient::solar_system());
        QuizService::new(fixture.clone(), fixture).with_clock(fixed_clock())
    }

    #[tokio::test]
    async fn start_session_loads_and_becomes_ready() {
        let service = build_service();
        let session = service.start_session(PassageId::new(1)).await;

        assert_eq!(session.status(), SessionStatus::Ready);
        assert_eq!(session.total_questions(), 5);
        assert_eq!(session.scoring_mode(), ScoringMode::Local);
    }

    #[tokio::test]
    async fn start_session_for_missing_passage_fails_in_place() {
        let service = build_service();
        let session = service.start_session(PassageId::new(404)).await;

        assert_eq!(session.status(), SessionStatus::Failed);
        assert!(matches!(
            session.last_error(),
            Some(SessionError::Load(client::LoadError::NotFound))
        ));
    }
}
