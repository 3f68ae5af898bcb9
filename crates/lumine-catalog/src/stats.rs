//! Download statistics
//!
//! Download counters are published per device and per branch. The stats view
//! shows one row per device (deduplicated across branch catalogs) with the
//! sum of its counters over every branch.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::de::lenient_u64;
use crate::device::Device;

/// Default location of the per-device download counters
pub const DEFAULT_STATS_BASE: &str = "https://sourceforge.net/projects/luminedroid/files";

/// A device row in the stats view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsDevice {
    /// Short device identifier, as first seen
    pub codename: String,
    /// Marketing name
    pub name: String,
}

impl StatsDevice {
    /// Key used to merge counters across branches
    #[must_use]
    pub fn key(&self) -> String {
        self.codename.to_lowercase()
    }
}

/// Collect devices from several branch catalogs, first occurrence wins
///
/// Codenames are compared case-insensitively.
#[must_use]
pub fn unique_devices<'a, I>(devices: I) -> Vec<StatsDevice>
where
    I: IntoIterator<Item = &'a Device>,
{
    let mut seen = HashSet::new();
    devices
        .into_iter()
        .map(|d| StatsDevice {
            codename: d.codename.clone(),
            name: d.name.clone(),
        })
        .filter(|d| seen.insert(d.key()))
        .collect()
}

/// URL of the download counters for one device on one branch, up to `today`
#[must_use]
pub fn stats_url(stats_base: &str, codename: &str, branch: &str, today: NaiveDate) -> String {
    format!(
        "{}/{codename}/{branch}/stats/json?start_date=2000-01-01&end_date={}",
        stats_base.trim_end_matches('/'),
        today.format("%Y-%m-%d")
    )
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CounterDocument {
    #[serde(deserialize_with = "lenient_u64")]
    total: Option<u64>,
}

/// Read the `total` field of a counters document; anything unusable counts as 0
#[must_use]
pub fn parse_download_total(json: &str) -> u64 {
    serde_json::from_str::<CounterDocument>(json)
        .ok()
        .and_then(|doc| doc.total)
        .unwrap_or(0)
}

/// A device with its summed downloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedDevice {
    /// Short device identifier
    pub codename: String,
    /// Marketing name
    pub name: String,
    /// Downloads summed over all branches
    pub downloads: u64,
}

/// Download totals per device
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadStats {
    /// Devices in catalog order
    pub devices: Vec<StatsDevice>,
    /// Totals keyed by lowercase codename
    pub totals: BTreeMap<String, u64>,
}

impl DownloadStats {
    /// Start with every device at zero downloads
    #[must_use]
    pub fn new(devices: Vec<StatsDevice>) -> Self {
        Self {
            devices,
            totals: BTreeMap::new(),
        }
    }

    /// Add one branch counter for a device
    ///
    /// Sums saturate at `u64::MAX`.
    pub fn record(&mut self, codename: &str, total: u64) {
        let sum = self.totals.entry(codename.to_lowercase()).or_insert(0);
        *sum = sum.saturating_add(total);
    }

    /// Summed downloads for a codename (case-insensitive)
    #[must_use]
    pub fn downloads(&self, codename: &str) -> u64 {
        self.totals
            .get(&codename.to_lowercase())
            .copied()
            .unwrap_or(0)
    }

    /// Downloads over every device and branch
    #[must_use]
    pub fn grand_total(&self) -> u64 {
        self.totals.values().fold(0, |acc, n| acc.saturating_add(*n))
    }

    /// Devices matching `search`, most downloaded first
    ///
    /// The search is a case-insensitive substring match on name or codename.
    /// Devices with equal downloads keep catalog order.
    #[must_use]
    pub fn ranked(&self, search: &str) -> Vec<RankedDevice> {
        let search = search.to_lowercase();
        let mut rows: Vec<RankedDevice> = self
            .devices
            .iter()
            .filter(|d| {
                d.name.to_lowercase().contains(&search)
                    || d.codename.to_lowercase().contains(&search)
            })
            .map(|d| RankedDevice {
                codename: d.codename.clone(),
                name: d.name.clone(),
                downloads: self.totals.get(&d.key()).copied().unwrap_or(0),
            })
            .collect();
        rows.sort_by(|a, b| b.downloads.cmp(&a.downloads));
        rows
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the grand total equals the sum of all recorded counters
        #[test]
        fn prop_grand_total_is_sum(counts in proptest::collection::vec(("[a-cA-C]", 0u64..10_000), 0..30)) {
            let mut stats = DownloadStats::default();
            for (codename, total) in &counts {
                stats.record(codename, *total);
            }
            prop_assert_eq!(stats.grand_total(), counts.iter().map(|(_, t)| t).sum::<u64>());
        }

        /// Property: ranked rows never increase in downloads
        #[test]
        fn prop_ranked_non_increasing(counts in proptest::collection::vec(0u64..1_000, 1..10)) {
            let devices: Vec<StatsDevice> = (0..counts.len())
                .map(|i| StatsDevice { codename: format!("dev{i}"), name: format!("Device {i}") })
                .collect();
            let mut stats = DownloadStats::new(devices);
            for (i, total) in counts.iter().enumerate() {
                stats.record(&format!("dev{i}"), *total);
            }
            let ranked = stats.ranked("");
            prop_assert_eq!(ranked.len(), counts.len());
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].downloads >= pair[1].downloads);
            }
        }
    }
}
