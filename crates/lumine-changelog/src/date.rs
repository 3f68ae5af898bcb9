//! Date handling for changelog header labels
//!
//! Header labels are free text. Two helpers interpret them:
//!
//! - [`format_date`] turns an embedded `YYYY-MM-DD` token into a long English
//!   date for display, and leaves anything else untouched.
//! - [`parse_date_label`] recognizes the whole label as a date for ordering.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta};
use regex::Regex;

static YMD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]{4})-([0-9]{2})-([0-9]{2})").expect("date pattern is valid")
});

/// Date-only layouts accepted by [`parse_date_label`]
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
];

/// Date-time layouts accepted by [`parse_date_label`]
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Format the first `YYYY-MM-DD` token in `token` as e.g. `November 3, 2025`
///
/// Out-of-range months and days roll over into neighbouring months, so
/// `2025-13-01` renders as `January 1, 2026`. Labels without such a token are
/// returned unchanged.
#[must_use]
pub fn format_date(token: &str) -> String {
    embedded_date(token)
        .map(|date| date.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|| token.to_string())
}

/// Calendar date built from the first `YYYY-MM-DD` token, with rollover
fn embedded_date(token: &str) -> Option<NaiveDate> {
    let caps = YMD.captures(token)?;
    let year: i32 = caps[1].parse().ok()?;
    let month: i32 = caps[2].parse().ok()?;
    let day: i64 = caps[3].parse().ok()?;

    // zero-based month index counted from year 0
    let months = year * 12 + month - 1;
    let month_start = NaiveDate::from_ymd_opt(
        months.div_euclid(12),
        u32::try_from(months.rem_euclid(12) + 1).ok()?,
        1,
    )?;
    month_start.checked_add_signed(TimeDelta::try_days(day - 1)?)
}

/// Interpret a whole header label as a point in time
///
/// Accepts ISO dates (`2025-11-01`), RFC 3339 timestamps, slash dates and
/// English month-name dates (`November 1, 2025`, `1 Nov 2025`). Returns
/// `None` for anything else.
#[must_use]
pub fn parse_date_label(label: &str) -> Option<NaiveDateTime> {
    let label = label.trim();
    if label.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(label) {
        return Some(ts.naive_utc());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(label, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(label, fmt).ok())
                .map(|date| date.and_time(chrono::NaiveTime::MIN))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn test_format_iso_date() {
        assert_eq!(format_date("2025-11-03"), "November 3, 2025");
        assert_eq!(format_date("2024-02-29"), "February 29, 2024");
        assert_eq!(format_date("2025-01-01"), "January 1, 2025");
    }

    #[test]
    fn test_format_embedded_token() {
        assert_eq!(format_date("Build 2025-07-09 (stable)"), "July 9, 2025");
        assert_eq!(format_date("2025-07-09 and 2024-01-01"), "July 9, 2025");
    }

    #[test]
    fn test_format_passthrough() {
        assert_eq!(format_date("unlabeled"), "unlabeled");
        assert_eq!(format_date(""), "");
        assert_eq!(format_date("2025-1-3"), "2025-1-3");
        assert_eq!(format_date("November 3, 2025"), "November 3, 2025");
    }

    #[test]
    fn test_format_rolls_over() {
        assert_eq!(format_date("2025-13-01"), "January 1, 2026");
        assert_eq!(format_date("2025-02-30"), "March 2, 2025");
        assert_eq!(format_date("2025-03-00"), "February 28, 2025");
        assert_eq!(format_date("2025-00-15"), "December 15, 2024");
        assert_eq!(format_date("2025-99-99"), "June 7, 2033");
    }

    #[test]
    fn test_format_ignores_unicode_digits() {
        // Arabic-Indic digits are not part of a date token
        assert_eq!(format_date("٢٠٢٥-١١-٠٣"), "٢٠٢٥-١١-٠٣");
    }

    #[test]
    fn test_parse_iso_label() {
        let parsed = parse_date_label("2025-11-01").expect("iso date");
        assert_eq!(parsed.to_string(), "2025-11-01 00:00:00");
    }

    #[test]
    fn test_parse_month_name_labels() {
        let expected = parse_date_label("2025-11-01");
        assert_eq!(parse_date_label("November 1, 2025"), expected);
        assert_eq!(parse_date_label("Nov 1, 2025"), expected);
        assert_eq!(parse_date_label("1 November 2025"), expected);
        assert_eq!(parse_date_label("2025/11/01"), expected);
        assert_eq!(parse_date_label("  2025-11-01  "), expected);
    }

    #[test]
    fn test_parse_timestamps() {
        let parsed = parse_date_label("2025-11-01T10:30:00Z").expect("rfc3339");
        assert_eq!(parsed.to_string(), "2025-11-01 10:30:00");
        assert!(parse_date_label("2025-11-01T10:30:00").is_some());
        assert!(parse_date_label("2025-11-01 10:30:00").is_some());
    }

    #[test]
    fn test_parse_unrecognized_labels() {
        assert_eq!(parse_date_label(""), None);
        assert_eq!(parse_date_label("Beta"), None);
        assert_eq!(parse_date_label("2025-13-01"), None);
        assert_eq!(parse_date_label("2025-11-01 hotfix"), None);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: format_date never panics
        #[test]
        fn prop_format_date_is_total(s in ".*") {
            let _ = format_date(&s);
        }

        /// Property: labels without four consecutive ASCII digits pass through
        #[test]
        fn prop_passthrough_without_token(s in "[^0-9]*") {
            prop_assert_eq!(format_date(&s), s);
        }

        /// Property: every valid calendar date formats to its long form
        #[test]
        fn prop_valid_dates_format_like_chrono(
            y in 1000i32..=9999,
            m in 1u32..=12,
            d in 1u32..=28
        ) {
            let date = NaiveDate::from_ymd_opt(y, m, d).expect("valid date");
            let token = date.format("%Y-%m-%d").to_string();
            prop_assert_eq!(format_date(&token), date.format("%B %-d, %Y").to_string());
        }
    }
}
