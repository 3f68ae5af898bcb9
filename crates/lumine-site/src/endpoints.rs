//! Data endpoint URLs
//!
//! All device data is published per release branch under one base URL.

use chrono::NaiveDate;

/// Published device data, one directory per release branch
pub const DEFAULT_BASE_URL: &str =
    "https://raw.githubusercontent.com/LumineDroid-Devices/official_devices/refs/heads";

/// URLs of every document the site reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
    stats_base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, lumine_catalog::stats::DEFAULT_STATS_BASE)
    }
}

impl Endpoints {
    /// Create endpoints from a data base URL and a stats base URL
    ///
    /// Trailing slashes are dropped.
    #[must_use]
    pub fn new(base_url: &str, stats_base: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            stats_base: stats_base.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL of the published device data
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base URL of the download counters
    #[must_use]
    pub fn stats_base(&self) -> &str {
        &self.stats_base
    }

    /// Combined ROM changelog of a branch
    #[must_use]
    pub fn changelog_url(&self, branch: &str) -> String {
        format!("{}/{branch}/changelogs/source.txt", self.base_url)
    }

    /// Changelog of one device on a branch
    #[must_use]
    pub fn device_changelog_url(&self, branch: &str, codename: &str) -> String {
        format!("{}/{branch}/changelogs/{codename}.txt", self.base_url)
    }

    /// Device catalog of a branch
    #[must_use]
    pub fn catalog_url(&self, branch: &str) -> String {
        format!("{}/{branch}/devices.json", self.base_url)
    }

    /// Build metadata of one device on a branch
    #[must_use]
    pub fn build_url(&self, branch: &str, codename: &str) -> String {
        format!("{}/{branch}/API/{codename}.json", self.base_url)
    }

    /// Download counters of one device on a branch, up to `today`
    #[must_use]
    pub fn stats_url(&self, codename: &str, branch: &str, today: NaiveDate) -> String {
        lumine_catalog::stats::stats_url(&self.stats_base, codename, branch, today)
    }
}
