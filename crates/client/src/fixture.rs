use std::collections::HashMap;

use async_trait::async_trait;

use readquiz_core::model::{
    AnswerKey, AnswerSelections, Choice, ChoiceId, Passage, PassageId, Question, QuestionId,
    QuestionSet, ScoreResult,
};
use readquiz_core::scorer;

use crate::source::{
    LoadError, LoadedQuiz, QuizLoader, ScoringMode, SubmissionClient, SubmitError,
};

/// One hosted quiz: a passage, its questions, and the local answer key.
#[derive(Debug, Clone)]
struct FixtureEntry {
    passage: Passage,
    questions: QuestionSet,
    answer_key: Option<AnswerKey>,
}

/// In-memory quiz source that scores locally and never touches the network.
///
/// Used for offline demos and as the test double in session tests. Quizzes
/// are registered up front; afterwards the client is shared immutably, so a
/// single instance can serve as both loader and submission client.
#[derive(Debug, Clone, Default)]
pub struct FixtureQuizClient {
    quizzes: HashMap<PassageId, FixtureEntry>,
}

impl FixtureQuizClient {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a quiz, replacing any previous entry for the passage.
    ///
    /// A quiz registered without an answer key loads fine but rejects every
    /// submission, which mirrors a backend that has no key on file.
    pub fn insert_quiz(
        &mut self,
        passage: Passage,
        questions: QuestionSet,
        answer_key: Option<AnswerKey>,
    ) {
        self.quizzes.insert(
            passage.id(),
            FixtureEntry {
                passage,
                questions,
                answer_key,
            },
        );
    }

    /// Builder-style variant of [`insert_quiz`](Self::insert_quiz).
    #[must_use]
    pub fn with_quiz(
        mut self,
        passage: Passage,
        questions: QuestionSet,
        answer_key: Option<AnswerKey>,
    ) -> Self {
        self.insert_quiz(passage, questions, answer_key);
        self
    }

    /// The canonical demo client: one five-question quiz about the solar
    /// system, hosted under passage id 1.
    ///
    /// # Panics
    ///
    /// Panics if the embedded quiz data fails validation; the shipped data
    /// does not.
    #[must_use]
    pub fn solar_system() -> Self {
        Self::try_solar_system().expect("embedded solar system quiz should be valid")
    }

    fn try_solar_system() -> Result<Self, readquiz_core::Error> {
        let passage = Passage::new(
            PassageId::new(1),
            "The Solar System",
            "A passage about planets, stars, and space...",
        )?;

        let questions = QuestionSet::new(vec![
            build_question(
                1,
                "How many planets are in our solar system?",
                1,
                ["7 planets", "8 planets", "9 planets", "10 planets"],
            )?,
            build_question(
                2,
                "Which planet is closest to the Sun?",
                5,
                ["Venus", "Mercury", "Earth", "Mars"],
            )?,
            build_question(
                3,
                "What is the largest planet in our solar system?",
                9,
                ["Saturn", "Jupiter", "Neptune", "Uranus"],
            )?,
            build_question(
                4,
                "Which planet is known as the 'Red Planet'?",
                13,
                ["Venus", "Jupiter", "Mars", "Saturn"],
            )?,
            build_question(
                5,
                "What force keeps planets in orbit around the Sun?",
                17,
                ["Magnetism", "Gravity", "Centrifugal force", "Solar wind"],
            )?,
        ])?;

        let answer_key: AnswerKey = [
            (QuestionId::new(1), ChoiceId::new(2)),
            (QuestionId::new(2), ChoiceId::new(6)),
            (QuestionId::new(3), ChoiceId::new(10)),
            (QuestionId::new(4), ChoiceId::new(15)),
            (QuestionId::new(5), ChoiceId::new(18)),
        ]
        .into_iter()
        .collect();

        Ok(Self::new().with_quiz(passage, questions, Some(answer_key)))
    }
}

/// Builds a four-choice question with sequential choice ids starting at
/// `first_choice_id`.
fn build_question(
    id: u64,
    text: &str,
    first_choice_id: u64,
    choice_texts: [&str; 4],
) -> Result<Question, readquiz_core::Error> {
    let choices = (first_choice_id..)
        .zip(['A', 'B', 'C', 'D'])
        .zip(choice_texts)
        .map(|((choice_id, letter), choice_text)| {
            Choice::new(ChoiceId::new(choice_id), letter, choice_text)
        })
        .collect();
    Ok(Question::new(QuestionId::new(id), text, choices)?)
}

#[async_trait]
impl QuizLoader for FixtureQuizClient {
    async fn load(&self, passage_id: PassageId) -> Result<LoadedQuiz, LoadError> {
        let entry = self.quizzes.get(&passage_id).ok_or(LoadError::NotFound)?;

        tracing::debug!(
            target: "readquiz.client",
            op = "load",
            passage_id = %passage_id,
            questions = entry.questions.len(),
            "serving fixture quiz"
        );
        Ok(LoadedQuiz {
            passage: entry.passage.clone(),
            questions: entry.questions.clone(),
            answer_key: entry.answer_key.clone(),
        })
    }
}

#[async_trait]
impl SubmissionClient for FixtureQuizClient {
    async fn submit(
        &self,
        passage_id: PassageId,
        selections: &AnswerSelections,
    ) -> Result<ScoreResult, SubmitError> {
        let entry = self.quizzes.get(&passage_id).ok_or_else(|| {
            SubmitError::Validation(format!("no quiz hosted for passage {passage_id}"))
        })?;
        let key = entry.answer_key.as_ref().ok_or_else(|| {
            SubmitError::Validation(format!("no answer key for passage {passage_id}"))
        })?;

        let result = scorer::score(selections, key);
        tracing::debug!(
            target: "readquiz.client",
            op = "submit",
            passage_id = %passage_id,
            score = %result,
            "quiz scored locally"
        );
        Ok(result)
    }

    fn mode(&self) -> ScoringMode {
        ScoringMode::Local
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
