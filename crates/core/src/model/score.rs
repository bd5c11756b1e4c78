use std::fmt;

use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoreError {
    #[error("correct count {correct} exceeds total {total}")]
    CorrectExceedsTotal { correct: u32, total: u32 },
}

//
// ─── SCORE RESULT ──────────────────────────────────────────────────────────────
//

/// Outcome of scoring: how many answers were correct out of how many
/// questions. The percentage is derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreResult {
    correct: u32,
    total: u32,
}

impl ScoreResult {
    /// Creates a score result.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError::CorrectExceedsTotal` when the counts are
    /// inconsistent, which guards against malformed backend responses.
    pub fn new(correct: u32, total: u32) -> Result<Self, ScoreError> {
        if correct > total {
            return Err(ScoreError::CorrectExceedsTotal { correct, total });
        }
        Ok(Self { correct, total })
    }

    /// Internal constructor for counts that are consistent by construction.
    pub(crate) fn from_counts(correct: u32, total: u32) -> Self {
        debug_assert!(correct <= total);
        Self { correct, total }
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Percentage of correct answers, rounded to the nearest integer.
    ///
    /// Zero when the total is zero, which keeps the value defined even
    /// though scoring never runs against an empty question set.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (f64::from(self.correct) / f64::from(self.total) * 100.0).round() as u32
    }
}

impl fmt::Display for ScoreResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.correct, self.total)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consistent_counts_accepted() {
        let score = ScoreResult::new(4, 5).unwrap();
        assert_eq!(score.correct(), 4);
        assert_eq!(score.total(), 5);
    }

    #[test]
    fn test_correct_above_total_rejected() {
        let result = ScoreResult::new(6, 5);
        assert!(matches!(
            result,
            Err(ScoreError::CorrectExceedsTotal { correct: 6, total: 5 })
        ));
    }

    #[test]
    fn test_percentage_rounds_to_nearest() {
        assert_eq!(ScoreResult::new(5, 5).unwrap().percentage(), 100);
        assert_eq!(ScoreResult::new(4, 5).unwrap().percentage(), 80);
        assert_eq!(ScoreResult::new(1, 3).unwrap().percentage(), 33);
        assert_eq!(ScoreResult::new(2, 3).unwrap().percentage(), 67);
        assert_eq!(ScoreResult::new(0, 5).unwrap().percentage(), 0);
    }

    #[test]
    fn test_percentage_of_empty_total_is_zero() {
        assert_eq!(ScoreResult::new(0, 0).unwrap().percentage(), 0);
    }

    #[test]
    fn test_display_reads_as_fraction() {
        assert_eq!(ScoreResult::new(4, 5).unwrap().to_string(), "4/5");
    }
}
