#![forbid(unsafe_code)]

pub mod fixture;
pub mod remote;
pub mod source;

pub use fixture::FixtureQuizClient;
pub use remote::{DEFAULT_BASE_URL, RemoteConfig, RemoteQuizClient};
pub use source::{
    LoadError, LoadedQuiz, QuizLoader, ScoringMode, SubmissionClient, SubmitError,
};
