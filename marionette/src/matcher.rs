//! Text/description matching policy for element lookups.

use crate::element::NodeAttributes;

/// A text query against an element's text or accessibility description.
///
/// Exact queries compare case-sensitively; substring queries compare
/// case-insensitively. Empty text and description are empty strings, so the
/// comparison never has a null case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextQuery {
    pub text: String,
    pub exact: bool,
}

impl TextQuery {
    pub fn exact(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            exact: true,
        }
    }

    pub fn containing(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            exact: false,
        }
    }

    pub fn matches(&self, attrs: &NodeAttributes) -> bool {
        if self.exact {
            attrs.text == self.text || attrs.description == self.text
        } else {
            let needle = self.text.to_lowercase();
            attrs.text.to_lowercase().contains(&needle)
                || attrs.description.to_lowercase().contains(&needle)
        }
    }
}
