//! Newest-first ordering of changelog entries
//!
//! Entries are ordered by their header label read as a date (see
//! [`parse_date_label`]). Labels that are not recognizable dates keep their
//! relative order and sort after every dated entry. The sort is stable, so
//! entries with equal dates stay in the order they were merged.

use std::cmp::Ordering;

use chrono::NaiveDateTime;

use crate::date::parse_date_label;
use crate::entry::ChangelogEntry;

/// Sort entries by date, most recent first
#[must_use]
pub fn sort_newest_first(entries: Vec<ChangelogEntry>) -> Vec<ChangelogEntry> {
    let mut keyed: Vec<(Option<NaiveDateTime>, ChangelogEntry)> = entries
        .into_iter()
        .map(|entry| (parse_date_label(&entry.date), entry))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| newest_first(a.as_ref(), b.as_ref()));
    keyed.into_iter().map(|(_, entry)| entry).collect()
}

/// Concatenate per-branch entry lists in the given order, then sort them
#[must_use]
pub fn merge_newest_first<I>(lists: I) -> Vec<ChangelogEntry>
where
    I: IntoIterator<Item = Vec<ChangelogEntry>>,
{
    sort_newest_first(lists.into_iter().flatten().collect())
}

fn newest_first(a: Option<&NaiveDateTime>, b: Option<&NaiveDateTime>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn label_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            (2000i32..2030, 1u32..=12, 1u32..=28)
                .prop_map(|(y, m, d)| format!("{y:04}-{m:02}-{d:02}")),
            "[A-Za-z ]{1,12}",
        ]
    }

    proptest! {
        /// Property: sorting keeps every entry (permutation)
        #[test]
        fn prop_sort_is_permutation(labels in proptest::collection::vec(label_strategy(), 0..30)) {
            let entries: Vec<_> = labels.iter().map(ChangelogEntry::new).collect();
            let mut before: Vec<_> = labels.clone();
            let mut after: Vec<_> = sort_newest_first(entries).into_iter().map(|e| e.date).collect();
            before.sort();
            after.sort();
            prop_assert_eq!(before, after);
        }

        /// Property: dated entries come out in non-increasing order
        #[test]
        fn prop_sorted_dates_non_increasing(labels in proptest::collection::vec(label_strategy(), 0..30)) {
            let sorted = sort_newest_first(labels.iter().map(ChangelogEntry::new).collect());
            let keys: Vec<_> = sorted.iter().map(|e| parse_date_label(&e.date)).collect();
            for pair in keys.windows(2) {
                match (&pair[0], &pair[1]) {
                    (Some(a), Some(b)) => prop_assert!(a >= b),
                    (None, Some(_)) => prop_assert!(false, "undated entry before dated entry"),
                    _ => {}
                }
            }
        }

        /// Property: sorting an already sorted list changes nothing
        #[test]
        fn prop_sort_is_idempotent(labels in proptest::collection::vec(label_strategy(), 0..30)) {
            let once = sort_newest_first(labels.iter().map(ChangelogEntry::new).collect());
            let twice = sort_newest_first(once.clone());
            prop_assert_eq!(once, twice);
        }
    }
}
