mod answer_key;
mod ids;
mod passage;
mod question;
mod score;
mod selections;

pub use ids::{ChoiceId, ParseIdError, PassageId, QuestionId};

pub use answer_key::AnswerKey;
pub use passage::{Passage, PassageError};
pub use question::{Choice, Question, QuestionError, QuestionSet, QuestionSetError};
pub use score::{ScoreError, ScoreResult};
pub use selections::AnswerSelections;
