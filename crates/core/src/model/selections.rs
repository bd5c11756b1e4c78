use std::collections::HashMap;

use crate::model::ids::{ChoiceId, QuestionId};

/// The user's current set of chosen answers, keyed by question.
///
/// Partial by design: questions are answered in any order and a question can
/// be re-answered freely, keeping only the latest choice. Completeness is
/// checked at submission time, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSelections {
    chosen: HashMap<QuestionId, ChoiceId>,
}

impl AnswerSelections {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the choice for a question, returning the choice it replaced.
    pub fn select(&mut self, question: QuestionId, choice: ChoiceId) -> Option<ChoiceId> {
        self.chosen.insert(question, choice)
    }

    /// The recorded choice for a question, if any.
    #[must_use]
    pub fn choice_for(&self, question: QuestionId) -> Option<ChoiceId> {
        self.chosen.get(&question).copied()
    }

    #[must_use]
    pub fn is_answered(&self, question: QuestionId) -> bool {
        self.chosen.contains_key(&question)
    }

    /// Number of questions answered so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chosen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chosen.is_empty()
    }

    /// Forgets every selection.
    pub fn clear(&mut self) {
        self.chosen.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, ChoiceId)> + '_ {
        self.chosen.iter().map(|(q, c)| (*q, *c))
    }

    /// Selections as pairs sorted by question id, for deterministic output.
    #[must_use]
    pub fn to_sorted_pairs(&self) -> Vec<(QuestionId, ChoiceId)> {
        let mut pairs: Vec<_> = self.iter().collect();
        pairs.sort_by_key(|(question, _)| *question);
        pairs
    }
}

impl FromIterator<(QuestionId, ChoiceId)> for AnswerSelections {
    fn from_iter<I: IntoIterator<Item = (QuestionId, ChoiceId)>>(iter: I) -> Self {
        Self {
            chosen: iter.into_iter().collect(),
        }
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_overwrites_and_returns_previous() {
        let mut selections = AnswerSelections::new();

        assert_eq!(
            selections.select(QuestionId::new(1), ChoiceId::new(2)),
            None
        );
        assert_eq!(
            selections.select(QuestionId::new(1), ChoiceId::new(3)),
            Some(ChoiceId::new(2))
        );
        assert_eq!(selections.len(), 1);
        assert_eq!(
            selections.choice_for(QuestionId::new(1)),
            Some(ChoiceId::new(3))
        );
    }

    #[test]
    fn test_unanswered_question_reads_back_none() {
        let selections = AnswerSelections::new();
        assert_eq!(selections.choice_for(QuestionId::new(5)), None);
        assert!(!selections.is_answered(QuestionId::new(5)));
    }

    #[test]
    fn test_clear_forgets_everything() {
        let mut selections: AnswerSelections = [
            (QuestionId::new(1), ChoiceId::new(2)),
            (QuestionId::new(2), ChoiceId::new(6)),
        ]
        .into_iter()
        .collect();

        selections.clear();
        assert!(selections.is_empty());
        assert_eq!(selections.choice_for(QuestionId::new(1)), None);
    }

    #[test]
    fn test_sorted_pairs_order_by_question_id() {
        let selections: AnswerSelections = [
            (QuestionId::new(3), ChoiceId::new(10)),
            (QuestionId::new(1), ChoiceId::new(2)),
            (QuestionId::new(2), ChoiceId::new(6)),
        ]
        .into_iter()
        .collect();

        let pairs = selections.to_sorted_pairs();
        assert_eq!(
            pairs,
            vec![
                (QuestionId::new(1), ChoiceId::new(2)),
                (QuestionId::new(2), ChoiceId::new(6)),
                (QuestionId::new(3), ChoiceId::new(10)),
            ]
        );
    }
}
