//! Option types offered by a combobox.

use serde::{Deserialize, Serialize};

/// A single selectable option.
///
/// Options carry no identity of their own; the widget addresses them by
/// position in the resolved list and never mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectOption {
    /// Value handed to the application.
    pub value: String,

    /// Display text, also the text matched by the search filter.
    pub label: String,
}

impl SelectOption {
    /// Create a new option.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Check whether the label contains `needle`, ignoring case.
    ///
    /// `needle` must already be lowercased; callers filtering a whole list
    /// lowercase the query once instead of once per option.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        needle.is_empty() || self.label.to_lowercase().contains(needle)
    }
}

impl From<&str> for SelectOption {
    /// Build an option whose value and label are the same text.
    fn from(s: &str) -> Self {
        Self::new(s, s)
    }
}

/// An ordered list of options as produced by a source.
pub type Options = Vec<SelectOption>;

/// Parse a JSON array of `{ "value": .., "label": .. }` objects.
pub fn options_from_json(json: &str) -> Result<Options, serde_json::Error> {
    serde_json::from_str(json)
}
