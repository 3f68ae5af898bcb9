//! Changelog entry type

use serde::{Deserialize, Serialize};

use crate::date::format_date;

/// One dated block of a changelog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChangelogEntry {
    /// Header label exactly as written between the `===` markers
    pub date: String,
    /// Change descriptions in source order, dash markers stripped
    #[serde(default)]
    pub changes: Vec<String>,
}

impl ChangelogEntry {
    /// Create an entry with no changes yet
    #[must_use]
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            changes: Vec::new(),
        }
    }

    /// Create an entry with the given changes
    #[must_use]
    pub fn with_changes<I, S>(date: impl Into<String>, changes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            date: date.into(),
            changes: changes.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if the entry has no change lines
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Display form of the header label (see [`format_date`])
    #[must_use]
    pub fn display_date(&self) -> String {
        format_date(&self.date)
    }

    /// Render the changes as a markdown bullet list
    #[must_use]
    pub fn to_markdown(&self) -> String {
        self.changes
            .iter()
            .map(|change| format!("- {change}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
