use std::env;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

use readquiz_core::model::{
    AnswerSelections, Choice, ChoiceId, Passage, PassageId, Question, QuestionId, QuestionSet,
    ScoreResult,
};

use crate::source::{
    LoadError, LoadedQuiz, QuizLoader, ScoringMode, SubmissionClient, SubmitError,
};

/// Base URL used when `READQUIZ_API_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Connection settings for the quiz backend.
#[derive(Clone, Debug)]
pub struct RemoteConfig {
    pub base_url: Url,
}

impl RemoteConfig {
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    /// Reads `READQUIZ_API_BASE_URL`, falling back to the development
    /// default.
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` if the override is not a valid URL.
    pub fn from_env() -> Result<Self, url::ParseError> {
        let raw = env::var("READQUIZ_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        Ok(Self {
            base_url: Url::parse(&raw)?,
        })
    }
}

/// Loader and submission client backed by the HTTP quiz backend.
///
/// Scoring happens server-side; responses never include correct-choice
/// markers, so nothing here can leak an answer key mid-quiz.
#[derive(Clone)]
pub struct RemoteQuizClient {
    http: Client,
    config: RemoteConfig,
}

impl RemoteQuizClient {
    #[must_use]
    pub fn new(config: RemoteConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// Builds a client from the environment.
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` if `READQUIZ_API_BASE_URL` is malformed.
    pub fn from_env() -> Result<Self, url::ParseError> {
        Ok(Self::new(RemoteConfig::from_env()?))
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{path}",
            self.config.base_url.as_str().trim_end_matches('/')
        )
    }

    async fn fetch_passage(&self, passage_id: PassageId) -> Result<PassageDto, LoadError> {
        let url = self.endpoint(&format!("documents/{passage_id}/"));
        let response = self.http.get(&url).send().await?;
        read_body(response, &url).await
    }

    async fn fetch_questions(&self, passage_id: PassageId) -> Result<QuestionListDto, LoadError> {
        let url = self.endpoint(&format!("documents/{passage_id}/detail/"));
        let response = self.http.get(&url).send().await?;
        read_body(response, &url).await
    }
}

impl From<reqwest::Error> for LoadError {
    fn from(err: reqwest::Error) -> Self {
        LoadError::Network(err.to_string())
    }
}

impl From<reqwest::Error> for SubmitError {
    fn from(err: reqwest::Error) -> Self {
        SubmitError::Network(err.to_string())
    }
}

/// Maps status codes and deserializes a successful body.
async fn read_body<T>(response: reqwest::Response, url: &str) -> Result<T, LoadError>
where
    T: serde::de::DeserializeOwned,
{
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(LoadError::NotFound);
    }
    if !status.is_success() {
        tracing::warn!(
            target: "readquiz.client",
            op = "load",
            %url,
            %status,
            "quiz fetch failed"
        );
        return Err(LoadError::Network(format!("backend returned {status}")));
    }
    response
        .json()
        .await
        .map_err(|err| LoadError::Network(format!("unparseable response: {err}")))
}

#[async_trait]
impl QuizLoader for RemoteQuizClient {
    async fn load(&self, passage_id: PassageId) -> Result<LoadedQuiz, LoadError> {
        let passage = self.fetch_passage(passage_id).await?;
        let questions = self.fetch_questions(passage_id).await?;

        let quiz = quiz_from_wire(passage, questions)
            .map_err(|err| LoadError::Network(format!("malformed quiz payload: {err}")))?;

        tracing::debug!(
            target: "readquiz.client",
            op = "load",
            passage_id = %passage_id,
            questions = quiz.questions.len(),
            "quiz loaded from backend"
        );
        Ok(quiz)
    }
}

#[async_trait]
impl SubmissionClient for RemoteQuizClient {
    async fn submit(
        &self,
        passage_id: PassageId,
        selections: &AnswerSelections,
    ) -> Result<ScoreResult, SubmitError> {
        let url = self.endpoint("submit-quiz/");
        let payload = SubmissionDto {
            document_id: passage_id.value(),
            answers: selections
                .to_sorted_pairs()
                .into_iter()
                .map(|(question, choice)| AnswerDto {
                    question_id: question.value(),
                    selected_answer_id: choice.value(),
                })
                .collect(),
        };

        let response = self.http.post(&url).json(&payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => format!("backend returned {status}"),
            };
            tracing::warn!(
                target: "readquiz.client",
                op = "submit",
                passage_id = %passage_id,
                %status,
                "submission rejected by backend"
            );
            return Err(SubmitError::Network(message));
        }

        let score: ScoreDto = response
            .json()
            .await
            .map_err(|err| SubmitError::Network(format!("unparseable score response: {err}")))?;

        let result = ScoreResult::new(score.score, score.total)
            .map_err(|err| SubmitError::Network(format!("invalid score response: {err}")))?;

        tracing::debug!(
            target: "readquiz.client",
            op = "submit",
            passage_id = %passage_id,
            score = %result,
            "quiz scored by backend"
        );
        Ok(result)
    }

    fn mode(&self) -> ScoringMode {
        ScoringMode::Remote
    }
}

/// Builds domain values out of the wire payloads.
///
/// Correctness markers are deliberately absent from the DTOs, so even a
/// backend that still sends them cannot leak the key into the session.
fn quiz_from_wire(
    passage: PassageDto,
    list: QuestionListDto,
) -> Result<LoadedQuiz, readquiz_core::Error> {
    let passage = Passage::new(
        PassageId::new(passage.id),
        passage.title,
        passage.parsed_text.unwrap_or_default(),
    )?;

    let mut questions = Vec::with_capacity(list.questions.len());
    for dto in list.questions {
        let choices = dto
            .answers
            .into_iter()
            .map(|answer| {
                Choice::new(
                    ChoiceId::new(answer.id),
                    answer.choice_letter.chars().next().unwrap_or('?'),
                    answer.choice_text,
                )
            })
            .collect();

        let mut question = Question::new(QuestionId::new(dto.id), dto.question_text, choices)?;
        if let Some(explanation) = dto.explanation {
            question = question.with_explanation(explanation);
        }
        questions.push(question);
    }

    Ok(LoadedQuiz {
        passage,
        questions: QuestionSet::new(questions)?,
        answer_key: None,
    })
}

#[derive(Debug, Deserialize)]
struct PassageDto {
    id: u64,
    title: String,
    #[serde(default, alias = "content")]
    parsed_text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QuestionListDto {
    #[serde(default)]
    questions: Vec<QuestionDto>,
}

#[derive(Debug, Deserialize)]
struct QuestionDto {
    id: u64,
    question_text: String,
    #[serde(default)]
    explanation: Option<String>,
    #[serde(default)]
    answers: Vec<AnswerOptionDto>,
}

#[derive(Debug, Deserialize)]
struct AnswerOptionDto {
    id: u64,
    choice_letter: String,
    choice_text: String,
}

#[derive(Debug, Serialize)]
struct SubmissionDto {
    document_id: u64,
    answers: Vec<AnswerDto>,
}

#[derive(Debug, Serialize)]
struct AnswerDto {
    question_id: u64,
    selected_answer_id: u64,
}

#[derive(Debug, Deserialize)]
struct ScoreDto {
    score: u32,
    total: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn build_config() -> RemoteConfig {
        RemoteConfig::new(Url::parse(DEFAULT_BASE_URL).unwrap())
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client = RemoteQuizClient::new(build_config());
        assert_eq!(
            client.endpoint("documents/5/"),
            "http://localhost:8000/api/documents/5/"
        );

        let trailing = RemoteQuizClient::new(RemoteConfig::new(
            Url::parse("http://localhost:8000/api/").unwrap(),
        ));
        assert_eq!(trailing.endpoint("submit-quiz/"), "http://localhost:8000/api/submit-quiz/");
    }

    #[test]
    fn test_passage_payload_accepts_both_text_fields() {
        let parsed: PassageDto = serde_json::from_str(
            r#"{"id": 1, "title": "The Solar System", "parsed_text": "Planets orbit the Sun."}"#,
        )
        .unwrap();
        assert_eq!(parsed.parsed_text.as_deref(), Some("Planets orbit the Sun."));

        let legacy: PassageDto = serde_json::from_str(
            r#"{"id": 1, "title": "The Solar System", "content": "Planets orbit the Sun."}"#,
        )
        .unwrap();
        assert_eq!(legacy.parsed_text.as_deref(), Some("Planets orbit the Sun."));

        let missing: PassageDto =
            serde_json::from_str(r#"{"id": 1, "title": "The Solar System"}"#).unwrap();
        assert_eq!(missing.parsed_text, None);
    }

    #[test]
    fn test_question_payload_leaves_correctness_markers_behind() {
        let payload = r#"{
            "questions": [
                {
                    "id": 2,
                    "question_text": "Which planet is closest to the Sun?",
                    "explanation": "Mercury orbits nearest.",
                    "answers": [
                        {"id": 5, "choice_letter": "A", "choice_text": "Venus", "is_correct": false},
                        {"id": 6, "choice_letter": "B", "choice_text": "Mercury", "is_correct": true}
                    ]
                }
            ]
        }"#;

        let list: QuestionListDto = serde_json::from_str(payload).unwrap();
        let quiz = quiz_from_wire(
            PassageDto {
                id: 1,
                title: "The Solar System".into(),
                parsed_text: None,
            },
            list,
        )
        .unwrap();

        assert_eq!(quiz.questions.len(), 1);
        assert!(quiz.answer_key.is_none());

        let question = quiz.questions.by_id(QuestionId::new(2)).unwrap();
        assert_eq!(question.explanation(), Some("Mercury orbits nearest."));
        assert_eq!(question.choices()[1].letter(), 'B');
        assert_eq!(question.choices()[1].text(), "Mercury");
    }

    #[test]
    fn test_question_without_choices_is_malformed() {
        let list: QuestionListDto = serde_json::from_str(
            r#"{"questions": [{"id": 9, "question_text": "Pick one", "answers": []}]}"#,
        )
        .unwrap();

        let result = quiz_from_wire(
            PassageDto {
                id: 1,
                title: "The Solar System".into(),
                parsed_text: None,
            },
            list,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_submission_payload_shape() {
        let selections: AnswerSelections = [
            (QuestionId::new(2), ChoiceId::new(6)),
            (QuestionId::new(1), ChoiceId::new(2)),
        ]
        .into_iter()
        .collect();

        let payload = SubmissionDto {
            document_id: 1,
            answers: selections
                .to_sorted_pairs()
                .into_iter()
                .map(|(question, choice)| AnswerDto {
                    question_id: question.value(),
                    selected_answer_id: choice.value(),
                })
                .collect(),
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "document_id": 1,
                "answers": [
                    {"question_id": 1, "selected_answer_id": 2},
                    {"question_id": 2, "selected_answer_id": 6}
                ]
            })
        );
    }

    #[test]
    fn test_score_payload_maps_into_domain() {
        let dto: ScoreDto = serde_json::from_str(r#"{"score": 4, "total": 5}"#).unwrap();
        let score = ScoreResult::new(dto.score, dto.total).unwrap();
        assert_eq!(score.percentage(), 80);
    }

    #[test]
    fn test_inconsistent_score_payload_rejected() {
        let dto: ScoreDto = serde_json::from_str(r#"{"score": 9, "total": 5}"#).unwrap();
        assert!(ScoreResult::new(dto.score, dto.total).is_err());
    }

    #[test]
    fn test_error_body_parses_backend_shape() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error": "No answers provided"}"#).unwrap();
        assert_eq!(body.error, "No answers provided");
    }
}
