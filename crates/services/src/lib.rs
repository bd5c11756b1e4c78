#![forbid(unsafe_code)]

pub mod error;
pub mod session;

pub use readquiz_core::Clock;

pub use error::SessionError;

pub use session::{
    QuizOutcome, QuizService, QuizSession, RequestTag, SessionProgress, SessionStatus,
    SubmitRequest,
};
