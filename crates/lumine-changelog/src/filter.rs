//! Date and free-text filtering of changelog entries

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::entry::ChangelogEntry;

/// User-selected constraints on a changelog listing
///
/// Empty fields place no constraint. When both are set an entry has to
/// satisfy both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Exact header label to keep (case-sensitive)
    #[serde(default)]
    pub selected_date: String,
    /// Case-insensitive substring searched in the label and change lines
    #[serde(default)]
    pub search_query: String,
}

impl FilterCriteria {
    /// Restrict to one exact header label
    #[must_use]
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.selected_date = date.into();
        self
    }

    /// Restrict to entries mentioning `query`
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.search_query = query.into();
        self
    }

    /// Check if no constraint is active
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected_date.is_empty() && self.search_query.trim().is_empty()
    }

    /// Check a single entry against both constraints
    #[must_use]
    pub fn matches(&self, entry: &ChangelogEntry) -> bool {
        self.matches_date(entry) && self.matches_query(entry)
    }

    /// Keep the matching entries, preserving their order
    #[must_use]
    pub fn apply(&self, entries: &[ChangelogEntry]) -> Vec<ChangelogEntry> {
        entries
            .iter()
            .filter(|entry| self.matches(entry))
            .cloned()
            .collect()
    }

    fn matches_date(&self, entry: &ChangelogEntry) -> bool {
        self.selected_date.is_empty() || entry.date == self.selected_date
    }

    fn matches_query(&self, entry: &ChangelogEntry) -> bool {
        // whitespace-only queries are inactive, but an active query is matched verbatim
        if self.search_query.trim().is_empty() {
            return true;
        }
        let query = self.search_query.to_lowercase();
        entry.date.to_lowercase().contains(&query)
            || entry
                .changes
                .iter()
                .any(|change| change.to_lowercase().contains(&query))
    }
}

/// Filter `entries` by exact date and free-text query
///
/// Equivalent to building a [`FilterCriteria`] and calling
/// [`FilterCriteria::apply`].
#[must_use]
pub fn filter(
    entries: &[ChangelogEntry],
    selected_date: &str,
    search_query: &str,
) -> Vec<ChangelogEntry> {
    FilterCriteria::default()
        .with_date(selected_date)
        .with_query(search_query)
        .apply(entries)
}

/// Distinct header labels, in descending lexical order
///
/// For ISO labels lexical order is also chronological, newest first.
#[must_use]
pub fn unique_dates(entries: &[ChangelogEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| entry.date.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .rev()
        .map(str::to_string)
        .collect()
}
