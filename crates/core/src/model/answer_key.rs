use std::collections::HashMap;

use crate::model::ids::{ChoiceId, QuestionId};

/// The correct choice per question, used for local scoring.
///
/// Kept separate from `QuestionSet` so wire payloads and session state never
/// carry correctness flags on the choices themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerKey {
    correct: HashMap<QuestionId, ChoiceId>,
}

impl AnswerKey {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the correct choice for a question, returning the one it replaced.
    pub fn insert(&mut self, question: QuestionId, choice: ChoiceId) -> Option<ChoiceId> {
        self.correct.insert(question, choice)
    }

    /// The correct choice for a question, if the key covers it.
    #[must_use]
    pub fn correct_choice(&self, question: QuestionId) -> Option<ChoiceId> {
        self.correct.get(&question).copied()
    }

    /// Number of questions the key covers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.correct.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.correct.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, ChoiceId)> + '_ {
        self.correct.iter().map(|(q, c)| (*q, *c))
    }
}

impl FromIterator<(QuestionId, ChoiceId)> for AnswerKey {
    fn from_iter<I: IntoIterator<Item = (QuestionId, ChoiceId)>>(iter: I) -> Self {
        Self {
            correct: iter.into_iter().collect(),
        }
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let mut key = AnswerKey::new();
        assert_eq!(key.insert(QuestionId::new(1), ChoiceId::new(2)), None);
        assert_eq!(
            key.insert(QuestionId::new(1), ChoiceId::new(4)),
            Some(ChoiceId::new(2))
        );

        assert_eq!(key.correct_choice(QuestionId::new(1)), Some(ChoiceId::new(4)));
        assert_eq!(key.correct_choice(QuestionId::new(9)), None);
        assert_eq!(key.len(), 1);
    }

    #[test]
    fn test_collect_from_pairs() {
        let key: AnswerKey = [
            (QuestionId::new(1), ChoiceId::new(2)),
            (QuestionId::new(2), ChoiceId::new(6)),
        ]
        .into_iter()
        .collect();

        assert_eq!(key.len(), 2);
        assert_eq!(key.correct_choice(QuestionId::new(2)), Some(ChoiceId::new(6)));
    }
}
