//! Small validated text types shared by the ArtWeb crates.

#[derive(Debug, thiserror::Error)]
pub enum TextError {
    #[error("must not be blank")]
    Empty,
}

/// Trimmed text with at least one character left.
///
/// Required form fields (titles, categories, client names) go through this type before they
/// reach a stored record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Trims `input`, rejecting it if nothing is left.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Consumes the wrapper and returns the trimmed string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Maps blank input to `None` and trims anything else.
///
/// Form fields such as an external website URL are optional; an empty field means "absent"
/// rather than "present but empty".
pub fn blank_to_none(input: Option<String>) -> Option<String> {
    input
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Drops blank entries from an ordered list, keeping the order of the rest.
///
/// Entries are trimmed before being kept.
pub fn non_blank_entries(entries: Vec<String>) -> Vec<String> {
    entries
        .into_iter()
        .map(|e| e.trim().to_owned())
        .filter(|e| !e.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_text_trims_input() {
        let text = NonEmptyText::new("  Web Development  ").unwrap();
        assert_eq!(text.into_inner(), "Web Development");
    }

    #[test]
    fn test_non_empty_text_rejects_whitespace() {
        assert!(matches!(NonEmptyText::new("   \t"), Err(TextError::Empty)));
        assert!(matches!(NonEmptyText::new(""), Err(TextError::Empty)));
    }

    #[test]
    fn test_blank_to_none() {
        assert_eq!(blank_to_none(None), None);
        assert_eq!(blank_to_none(Some("   ".into())), None);
        assert_eq!(
            blank_to_none(Some(" https://example.com ".into())),
            Some("https://example.com".into())
        );
    }

    #[test]
    fn test_non_blank_entries_keeps_order() {
        let entries = vec![
            "React".to_string(),
            "".to_string(),
            "  ".to_string(),
            " Tailwind ".to_string(),
            "Supabase".to_string(),
        ];
        assert_eq!(
            non_blank_entries(entries),
            vec!["React", "Tailwind", "Supabase"]
        );
    }
}
