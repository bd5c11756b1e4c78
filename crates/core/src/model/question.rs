use thiserror::Error;

use crate::model::ids::{ChoiceId, QuestionId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("question must offer at least one choice")]
    NoChoices,

    #[error("duplicate choice id {0} within one question")]
    DuplicateChoice(ChoiceId),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionSetError {
    #[error("duplicate question id {0} in question set")]
    DuplicateQuestion(QuestionId),
}

//
// ─── CHOICE ────────────────────────────────────────────────────────────────────
//

/// One selectable option of a multiple-choice question.
///
/// The letter is a display label; the id is the identity that selections and
/// answer keys are compared by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    id: ChoiceId,
    letter: char,
    text: String,
}

impl Choice {
    #[must_use]
    pub fn new(id: ChoiceId, letter: char, text: impl Into<String>) -> Self {
        Self {
            id,
            letter,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> ChoiceId {
        self.id
    }

    #[must_use]
    pub fn letter(&self) -> char {
        self.letter
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A multiple-choice question with a fixed list of choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    text: String,
    explanation: Option<String>,
    choices: Vec<Choice>,
}

impl Question {
    /// Creates a question.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is blank, the choice list is empty, or
    /// two choices share an id.
    pub fn new(
        id: QuestionId,
        text: impl Into<String>,
        choices: Vec<Choice>,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if choices.is_empty() {
            return Err(QuestionError::NoChoices);
        }
        for (index, choice) in choices.iter().enumerate() {
            if choices[..index].iter().any(|c| c.id() == choice.id()) {
                return Err(QuestionError::DuplicateChoice(choice.id()));
            }
        }
        Ok(Self {
            id,
            text,
            explanation: None,
            choices,
        })
    }

    /// Attaches an explanation shown after the quiz is scored.
    #[must_use]
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    #[must_use]
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    /// Looks up a choice of this question by id.
    #[must_use]
    pub fn choice(&self, id: ChoiceId) -> Option<&Choice> {
        self.choices.iter().find(|c| c.id() == id)
    }

    /// Whether `id` names one of this question's own choices.
    #[must_use]
    pub fn has_choice(&self, id: ChoiceId) -> bool {
        self.choice(id).is_some()
    }
}

//
// ─── QUESTION SET ──────────────────────────────────────────────────────────────
//

/// Ordered collection of the questions belonging to one passage.
///
/// Order is significant: it defines navigation order and the 1-based display
/// numbering. An empty set is valid and means the passage has no quiz.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    /// Creates a set with no questions.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a set from already-validated questions.
    ///
    /// # Errors
    ///
    /// Returns `QuestionSetError::DuplicateQuestion` if two questions share
    /// an id.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionSetError> {
        for (index, question) in questions.iter().enumerate() {
            if questions[..index].iter().any(|q| q.id() == question.id()) {
                return Err(QuestionSetError::DuplicateQuestion(question.id()));
            }
        }
        Ok(Self { questions })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// The question at `index` in display order.
    #[must_use]
    pub fn question_at(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Looks up a question by id.
    #[must_use]
    pub fn by_id(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn build_choices() -> Vec<Choice> {
        vec![
            Choice::new(ChoiceId::new(1), 'A', "7 planets"),
            Choice::new(ChoiceId::new(2), 'B', "8 planets"),
            Choice::new(ChoiceId::new(3), 'C', "9 planets"),
            Choice::new(ChoiceId::new(4), 'D', "10 planets"),
        ]
    }

    fn build_question(id: u64) -> Question {
        Question::new(
            QuestionId::new(id),
            "How many planets are in our solar system?",
            build_choices(),
        )
        .unwrap()
    }

    #[test]
    fn test_question_exposes_choices_in_order() {
        let question = build_question(1);

        assert_eq!(question.choices().len(), 4);
        assert_eq!(question.choices()[1].letter(), 'B');
        assert_eq!(question.choices()[1].text(), "8 planets");
    }

    #[test]
    fn test_blank_text_rejected() {
        let result = Question::new(QuestionId::new(1), "  ", build_choices());
        assert!(matches!(result, Err(QuestionError::EmptyText)));
    }

    #[test]
    fn test_choiceless_question_rejected() {
        let result = Question::new(QuestionId::new(1), "Pick one", Vec::new());
        assert!(matches!(result, Err(QuestionError::NoChoices)));
    }

    #[test]
    fn test_duplicate_choice_id_rejected() {
        let choices = vec![
            Choice::new(ChoiceId::new(1), 'A', "Venus"),
            Choice::new(ChoiceId::new(1), 'B', "Mercury"),
        ];
        let result = Question::new(QuestionId::new(1), "Closest to the Sun?", choices);
        assert!(matches!(
            result,
            Err(QuestionError::DuplicateChoice(id)) if id == ChoiceId::new(1)
        ));
    }

    #[test]
    fn test_has_choice_only_sees_own_choices() {
        let question = build_question(1);

        assert!(question.has_choice(ChoiceId::new(2)));
        assert!(!question.has_choice(ChoiceId::new(99)));
    }

    #[test]
    fn test_explanation_defaults_to_none() {
        let question = build_question(1);
        assert_eq!(question.explanation(), None);

        let explained = question.with_explanation("Mercury, Venus, Earth, Mars, and four more.");
        assert_eq!(
            explained.explanation(),
            Some("Mercury, Venus, Earth, Mars, and four more.")
        );
    }

    #[test]
    fn test_set_indexing_and_lookup() {
        let set = QuestionSet::new(vec![build_question(1), build_question(2)]).unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.question_at(1).map(Question::id), Some(QuestionId::new(2)));
        assert!(set.question_at(2).is_none());
        assert!(set.by_id(QuestionId::new(1)).is_some());
        assert!(set.by_id(QuestionId::new(9)).is_none());
    }

    #[test]
    fn test_duplicate_question_id_rejected() {
        let result = QuestionSet::new(vec![build_question(1), build_question(1)]);
        assert!(matches!(
            result,
            Err(QuestionSetError::DuplicateQuestion(id)) if id == QuestionId::new(1)
        ));
    }

    #[test]
    fn test_empty_set_is_valid() {
        let set = QuestionSet::empty();
        assert!(set.is_empty());
        assert!(set.question_at(0).is_none());
    }
}
