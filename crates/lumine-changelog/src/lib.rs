// Copyright (c) 2026 - present LumineDroid Team
// SPDX-License-Identifier: MIT

//! lumine-changelog: changelog processing for LumineDroid release branches
//!
//! This library crate turns the plain-text changelogs published per release
//! branch into dated entries, orders them newest first, and narrows them with
//! the date/search criteria used by the changelog views.

#![warn(missing_docs)]

//! # Example
//!
//! ```
//! use lumine_changelog::{FilterCriteria, format_date, parse};
//!
//! let entries = parse("=== 2025-11-01 ===\n- Fixed audio crash on boot\n");
//! let hits = FilterCriteria::default().with_query("audio").apply(&entries);
//!
//! assert_eq!(hits.len(), 1);
//! assert_eq!(format_date(&hits[0].date), "November 1, 2025");
//! ```

pub mod date;
pub mod entry;
pub mod filter;
pub mod order;
pub mod parser;

pub use date::{format_date, parse_date_label};
pub use entry::ChangelogEntry;
pub use filter::{FilterCriteria, filter, unique_dates};
pub use order::{merge_newest_first, sort_newest_first};
pub use parser::parse;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::entry::ChangelogEntry;
    pub use crate::filter::{FilterCriteria, unique_dates};
    pub use crate::parser::parse;
}
