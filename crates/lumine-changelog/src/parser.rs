// Copyright (c) 2026 - present LumineDroid Team
// SPDX-License-Identifier: MIT

//! Changelog text parsing
//!
//! Branch changelogs are plain text made of blocks introduced by a
//! `=== <label> ===` header and followed by `-` prefixed change lines:
//!
//! ```text
//! === 2025-11-01 ===
//! - Fixed audio crash on boot
//! - Updated kernel to latest LTS
//! ```
//!
//! Parsing is line oriented and total: unrecognized lines are skipped and
//! change lines that appear before the first header are dropped.

use std::sync::LazyLock;

use regex::Regex;

use crate::entry::ChangelogEntry;

static HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^===\s*(.+?)\s*===$").expect("header pattern is valid"));

/// Parse changelog text into entries in header order
#[must_use]
pub fn parse(text: &str) -> Vec<ChangelogEntry> {
    let mut entries = Vec::new();
    let mut current: Option<ChangelogEntry> = None;

    for line in text.lines() {
        let trimmed = line.trim_matches(is_blank);

        if let Some(label) = header_label(trimmed) {
            if let Some(done) = current.replace(ChangelogEntry::new(label)) {
                entries.push(done);
            }
            continue;
        }

        if let Some(entry) = current.as_mut()
            && let Some(change) = change_text(trimmed)
        {
            entry.changes.push(change.to_string());
        }
    }

    entries.extend(current);
    entries
}

/// Extract the label of a `=== label ===` header line
fn header_label(trimmed: &str) -> Option<&str> {
    HEADER
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Extract the description of a `- change` line
fn change_text(trimmed: &str) -> Option<&str> {
    trimmed
        .starts_with('-')
        .then(|| trimmed.trim_start_matches('-').trim_matches(is_blank))
}

/// Whitespace, plus the byte order mark
fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}
