/// Aggregated view of answering progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    /// True once every question has an answer recorded.
    pub is_complete: bool,
}

impl SessionProgress {
    /// Share of questions answered, rounded to the nearest whole percent.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.answered as f64 / self.total as f64 * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_to_nearest() {
        let progress = SessionProgress {
            total: 3,
            answered: 2,
            remaining: 1,
            is_complete: false,
        };
        assert_eq!(progress.percent(), 67);
    }

    #[test]
    fn percent_of_empty_session_is_zero() {
        let progress = SessionProgress {
            total: 0,
            answered: 0,
            remaining: 0,
            is_complete: false,
        };
        assert_eq!(progress.percent(), 0);
    }
}
