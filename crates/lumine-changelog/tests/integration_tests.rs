// Copyright (c) 2026 - present LumineDroid Team
// SPDX-License-Identifier: MIT

//! Integration tests for lumine-changelog
//!
//! These tests run the full parse, merge, filter pipeline over sample branch
//! changelogs stored in `tests/fixtures`.

use lumine_changelog::{
    ChangelogEntry, FilterCriteria, filter, format_date, merge_newest_first, parse, unique_dates,
};
use similar_asserts::assert_eq;
use std::path::{Path, PathBuf};

/// Get the fixtures directory for test data
fn fixtures_dir() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    Path::new(&manifest_dir).join("tests/fixtures")
}

fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(fixtures_dir().join(name))
        .unwrap_or_else(|e| panic!("Failed to read fixture {name}: {e}"))
}

fn merged_fixtures() -> Vec<ChangelogEntry> {
    merge_newest_first([
        parse(&read_fixture("bellflower-source.txt")),
        parse(&read_fixture("bynx-source.txt")),
    ])
}

#[test]
fn test_parse_bellflower_fixture() {
    let entries = parse(&read_fixture("bellflower-source.txt"));

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].date, "2025-11-01");
    assert_eq!(
        entries[0].changes,
        vec![
            "Fixed audio crash on boot",
            "Updated kernel to latest LTS",
            "Merged October security patch",
        ]
    );
    assert_eq!(entries[1].changes, vec!["Initial stable release"]);
    assert_eq!(entries[2].date, "Hotfix");
}

#[test]
fn test_parse_crlf_fixture() {
    let entries = parse(&read_fixture("bynx-source.txt"));

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].date, "2025-10-20");
    assert!(entries.iter().flat_map(|e| &e.changes).all(|c| !c.ends_with('\r')));
}

#[test]
fn test_merge_orders_branches_newest_first() {
    let merged = merged_fixtures();
    let dates: Vec<&str> = merged.iter().map(|e| e.date.as_str()).collect();

    assert_eq!(
        dates,
        vec!["2025-11-01", "2025-11-01", "2025-10-20", "2025-10-15", "Hotfix"]
    );
    // equal dates keep branch order
    assert_eq!(merged[0].changes[0], "Fixed audio crash on boot");
    assert_eq!(merged[1].changes[0], "Bynx: synced with bellflower");
}

#[test]
fn test_unique_dates_over_merged_branches() {
    assert_eq!(
        unique_dates(&merged_fixtures()),
        vec!["Hotfix", "2025-11-01", "2025-10-20", "2025-10-15"]
    );
}

#[test]
fn test_filter_merged_branches() {
    let merged = merged_fixtures();

    let bynx = filter(&merged, "", "bynx:");
    assert_eq!(bynx.len(), 2);

    let november = FilterCriteria::default()
        .with_date("2025-11-01")
        .apply(&merged);
    assert_eq!(november.len(), 2);

    let narrowed = filter(&merged, "2025-11-01", "kernel");
    assert_eq!(narrowed.len(), 1);
    assert_eq!(narrowed[0].changes.len(), 3);
}

#[test]
fn test_display_dates_for_merged_branches() {
    let labels: Vec<String> = merged_fixtures()
        .iter()
        .map(|e| format_date(&e.date))
        .collect();

    assert_eq!(labels[0], "November 1, 2025");
    assert_eq!(labels[2], "October 20, 2025");
    assert_eq!(labels[4], "Hotfix");
}

#[test]
fn test_entries_serialize_for_json_output() {
    let json = serde_json::to_value(merged_fixtures()).expect("serialize");
    let first = &json[0];

    assert_eq!(first["date"], "2025-11-01");
    assert_eq!(first["changes"].as_array().map(Vec::len), Some(3));
}
