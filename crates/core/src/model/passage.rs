use thiserror::Error;

use crate::model::ids::PassageId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PassageError {
    #[error("passage title cannot be empty")]
    EmptyTitle,
}

//
// ─── PASSAGE ───────────────────────────────────────────────────────────────────
//

/// The reading text a quiz is taken against.
///
/// Immutable once loaded; a session holds onto it for its whole lifetime.
/// The body may be empty (a passage whose text extraction produced nothing
/// is still a valid passage), the title may not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Passage {
    id: PassageId,
    title: String,
    body: String,
}

impl Passage {
    /// Creates a passage.
    ///
    /// # Errors
    ///
    /// Returns `PassageError::EmptyTitle` if the title is blank.
    pub fn new(
        id: PassageId,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Self, PassageError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(PassageError::EmptyTitle);
        }
        Ok(Self {
            id,
            title,
            body: body.into(),
        })
    }

    #[must_use]
    pub fn id(&self) -> PassageId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_passage_keeps_fields() {
        let passage = Passage::new(PassageId::new(1), "The Solar System", "Planets orbit the Sun.")
            .unwrap();

        assert_eq!(passage.id(), PassageId::new(1));
        assert_eq!(passage.title(), "The Solar System");
        assert_eq!(passage.body(), "Planets orbit the Sun.");
    }

    #[test]
    fn test_blank_title_rejected() {
        let result = Passage::new(PassageId::new(1), "   ", "body");
        assert!(matches!(result, Err(PassageError::EmptyTitle)));
    }

    #[test]
    fn test_empty_body_allowed() {
        let passage = Passage::new(PassageId::new(2), "Untitled Scan", "").unwrap();
        assert_eq!(passage.body(), "");
    }
}
