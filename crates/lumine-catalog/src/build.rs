//! Per-device build metadata
//!
//! `API/<codename>.json` on a branch describes the published builds for one
//! device. Only the first build of the `response` list is shown.

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::de::{lenient_i64, lenient_string, lenient_u64};
use crate::device::CatalogDevice;
use crate::error::CatalogError;

/// Text shown when a device has no changelog on the branch
pub const CHANGELOG_UNAVAILABLE: &str = "Changelog not available for this device.";

/// Placeholder for unknown sizes and dates
const UNKNOWN: &str = "Unknown";

/// One published build
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildInfo {
    /// Zip file name
    pub filename: Option<String>,
    /// Download URL
    pub download: Option<String>,
    /// Size in bytes
    #[serde(deserialize_with = "lenient_u64")]
    pub size: Option<u64>,
    /// MD5 checksum
    pub md5: Option<String>,
    /// SHA-256 checksum
    pub sha256: Option<String>,
    /// Build time in Unix seconds
    #[serde(deserialize_with = "lenient_i64")]
    pub datetime: Option<i64>,
    /// ROM version label
    #[serde(deserialize_with = "lenient_string")]
    pub version: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BuildResponse {
    response: Vec<BuildInfo>,
}

impl BuildInfo {
    /// Parse an `API/<codename>.json` document, returning its first build
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::JsonParse` if the document is not valid JSON or
    /// `response` is not a list of build records.
    pub fn from_api_json(json: &str) -> Result<Option<Self>, CatalogError> {
        let parsed: BuildResponse = serde_json::from_str(json)?;
        Ok(parsed.response.into_iter().next())
    }
}

/// Human readable size in GiB with two decimals, e.g. `2.00 GB`
#[must_use]
pub fn format_size(bytes: Option<u64>) -> String {
    match bytes {
        Some(bytes) if bytes > 0 => format!("{:.2} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0)),
        _ => UNKNOWN.to_string(),
    }
}

/// Short English date for a Unix timestamp (UTC), e.g. `Nov 3, 2025`
#[must_use]
pub fn format_timestamp(seconds: Option<i64>) -> String {
    seconds
        .filter(|s| *s != 0)
        .and_then(|s| DateTime::from_timestamp(s, 0))
        .map(|ts| ts.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Pick the branch to show: the requested one if allowed, else the first allowed
///
/// Returns `None` only when `allowed` is empty.
#[must_use]
pub fn resolve_variant<'a>(requested: Option<&str>, allowed: &'a [String]) -> Option<&'a str> {
    requested
        .and_then(|r| allowed.iter().find(|a| a.as_str() == r))
        .or_else(|| allowed.first())
        .map(String::as_str)
}

/// Everything the download page shows for one device on one branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDetail {
    /// Catalog record
    #[serde(flatten)]
    pub device: CatalogDevice,
    /// Branch the build and changelog come from
    pub branch: String,
    /// Latest build, when published
    pub build: Option<BuildInfo>,
    /// Raw device changelog text
    pub changelog: String,
}

impl DeviceDetail {
    /// Combine a catalog device with what was found on its branch
    #[must_use]
    pub fn new(
        device: CatalogDevice,
        branch: impl Into<String>,
        build: Option<BuildInfo>,
        changelog: Option<String>,
    ) -> Self {
        Self {
            device,
            branch: branch.into(),
            build,
            changelog: changelog.unwrap_or_else(|| CHANGELOG_UNAVAILABLE.to_string()),
        }
    }

    /// First `max_lines` changelog lines and whether more were cut off
    #[must_use]
    pub fn changelog_preview(&self, max_lines: usize) -> (Vec<&str>, bool) {
        let lines: Vec<&str> = self.changelog.lines().collect();
        let truncated = lines.len() > max_lines;
        (lines.into_iter().take(max_lines).collect(), truncated)
    }
}
