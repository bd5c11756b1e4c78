//! Pure scoring of answer selections against an answer key.

use crate::model::{AnswerKey, AnswerSelections, ScoreResult};

/// Scores `selections` against `key`.
///
/// The total is the number of questions the key covers; one point is awarded
/// per question whose recorded selection matches the key. A question the key
/// covers but the selections miss counts as incorrect rather than erroring,
/// because completeness is enforced at submission time, not here. Selections
/// for questions the key does not cover are ignored.
///
/// # Examples
///
/// ```
/// # use readquiz_core::model::{AnswerKey, AnswerSelections, ChoiceId, QuestionId};
/// # use readquiz_core::scorer;
/// let key: AnswerKey = [(QuestionId::new(1), ChoiceId::new(2))].into_iter().collect();
/// let selections: AnswerSelections =
///     [(QuestionId::new(1), ChoiceId::new(2))].into_iter().collect();
/// assert_eq!(scorer::score(&selections, &key).correct(), 1);
/// ```
#[must_use]
pub fn score(selections: &AnswerSelections, key: &AnswerKey) -> ScoreResult {
    let matched = key
        .iter()
        .filter(|(question, correct)| selections.choice_for(*question) == Some(*correct))
        .count();

    let correct = u32::try_from(matched).unwrap_or(u32::MAX);
    let total = u32::try_from(key.len()).unwrap_or(u32::MAX);
    ScoreResult::from_counts(correct, total)
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
