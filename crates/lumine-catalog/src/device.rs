// Copyright (c) 2026 - present LumineDroid Team
// SPDX-License-Identifier: MIT

//! Device catalog parsing and lookup
//!
//! Each release branch publishes a `devices.json` that maps a brand name to
//! the list of devices supported under it:
//!
//! ```json
//! { "Xiaomi": [ { "name": "Redmi Note 10 Pro", "codename": "sweet", "maintainer": "..." } ] }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::de::lenient_string;
use crate::error::CatalogError;

/// Where device pictures are published, per branch
pub const DEVICE_IMAGE_BASE: &str =
    "https://github.com/LumineDroid-Devices/official_devices/raw/refs/heads";

/// Brand selector value that matches every brand
pub const ALL_BRANDS: &str = "All";

/// One Android version a device ships builds for
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportedVersion {
    /// Android version code (e.g. "15")
    #[serde(deserialize_with = "lenient_string")]
    pub version_code: Option<String>,
    /// Whether builds for this version are considered stable
    pub stable: Option<bool>,
}

/// A device entry as published in `devices.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Device {
    /// Marketing name
    pub name: String,
    /// Short device identifier
    pub codename: String,
    /// Maintainer display name
    pub maintainer: Option<String>,
    /// Maintainer GitHub handle or profile URL
    pub github: Option<String>,
    /// Maintainer Telegram handle or URL
    pub telegram: Option<String>,
    /// Support thread URL
    pub forum: Option<String>,
    /// Android versions with builds
    pub supported_versions: Vec<SupportedVersion>,
}

impl Device {
    /// Version code of the first supported version, if any
    #[must_use]
    pub fn latest_version_code(&self) -> Option<&str> {
        self.supported_versions
            .first()
            .and_then(|v| v.version_code.as_deref())
    }

    /// Stability flag of the first supported version, if declared
    #[must_use]
    pub fn is_stable(&self) -> Option<bool> {
        self.supported_versions.first().and_then(|v| v.stable)
    }
}

/// A catalog device together with its brand and picture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDevice {
    /// The published device record
    #[serde(flatten)]
    pub device: Device,
    /// Brand the device is listed under
    pub brand: String,
    /// Picture URL
    pub image: String,
}

/// Picture URL for a device on a branch
#[must_use]
pub fn device_image_url(branch: &str, codename: &str) -> String {
    format!("{DEVICE_IMAGE_BASE}/{branch}/assets/devices/{codename}.webp")
}

/// Parse a `devices.json` document into a flat device list
///
/// Brands keep their document order. Brands whose value is not a list
/// contribute no devices, and list items that are not device records or lack
/// a codename are skipped.
///
/// # Errors
///
/// Returns `CatalogError::JsonParse` for invalid JSON and
/// `CatalogError::UnexpectedShape` when the top level is not an object.
pub fn parse_catalog(json: &str, image_branch: &str) -> Result<Vec<CatalogDevice>, CatalogError> {
    let doc: Value = serde_json::from_str(json)?;
    let Value::Object(brands) = doc else {
        return Err(CatalogError::UnexpectedShape {
            document: "devices.json",
            expected: "an object keyed by brand",
        });
    };
    Ok(flatten_catalog(&brands, image_branch))
}

/// Flatten an already parsed brand map
#[must_use]
pub fn flatten_catalog(brands: &Map<String, Value>, image_branch: &str) -> Vec<CatalogDevice> {
    let mut devices = Vec::new();

    for (brand, listed) in brands {
        let Some(items) = listed.as_array() else {
            continue;
        };

        for item in items {
            let device = match Device::deserialize(item) {
                Ok(device) if !device.codename.is_empty() => device,
                Ok(_) => {
                    warn!(brand = %brand, "Skipping catalog device without codename");
                    continue;
                }
                Err(e) => {
                    warn!(brand = %brand, error = %e, "Skipping malformed catalog device");
                    continue;
                }
            };

            devices.push(CatalogDevice {
                image: device_image_url(image_branch, &device.codename),
                brand: brand.clone(),
                device,
            });
        }
    }

    devices
}

/// Brand selector values: `All` followed by each brand in first-seen order
#[must_use]
pub fn brands(devices: &[CatalogDevice]) -> Vec<String> {
    let mut out = vec![ALL_BRANDS.to_string()];
    for device in devices {
        if !out[1..].contains(&device.brand) {
            out.push(device.brand.clone());
        }
    }
    out
}

/// Devices matching a brand selector and a name/codename search
///
/// `brand` equal to [`ALL_BRANDS`] matches every brand. The search is a
/// case-insensitive substring match; an empty search matches everything.
#[must_use]
pub fn filter_devices<'a>(
    devices: &'a [CatalogDevice],
    brand: &str,
    search: &str,
) -> Vec<&'a CatalogDevice> {
    let search = search.to_lowercase();
    devices
        .iter()
        .filter(|d| brand == ALL_BRANDS || d.brand == brand)
        .filter(|d| {
            d.device.name.to_lowercase().contains(&search)
                || d.device.codename.to_lowercase().contains(&search)
        })
        .collect()
}

/// First device with exactly this codename
#[must_use]
pub fn find_device<'a>(devices: &'a [CatalogDevice], codename: &str) -> Option<&'a CatalogDevice> {
    devices.iter().find(|d| d.device.codename == codename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    const CATALOG: &str = r#"{
        "Xiaomi": [
            {
                "name": "Redmi Note 10 Pro",
                "codename": "sweet",
                "maintainer": "Alice",
                "github": "https://github.com/alice",
                "supported_versions": [{ "version_code": 15, "stable": true }]
            },
            { "name": "POCO F3", "codename": "alioth", "maintainer": "Bob" }
        ],
        "Google": [
            { "name": "Pixel 7", "codename": "panther", "extra_field": 1 }
        ],
        "Notes": "not a device list"
    }"#;

    fn catalog() -> Vec<CatalogDevice> {
        parse_catalog(CATALOG, "bellflower").expect("parse catalog")
    }

    #[test]
    fn test_parse_flattens_in_document_order() {
        let devices = catalog();
        let codenames: Vec<&str> = devices.iter().map(|d| d.device.codename.as_str()).collect();
        assert_eq!(codenames, vec!["sweet", "alioth", "panther"]);
        assert_eq!(devices[0].brand, "Xiaomi");
        assert_eq!(devices[2].brand, "Google");
    }

    #[test]
    fn test_image_url_uses_branch() {
        let devices = catalog();
        assert_eq!(
            devices[0].image,
            "https://github.com/LumineDroid-Devices/official_devices/raw/refs/heads/bellflower/assets/devices/sweet.webp"
        );
    }

    #[test]
    fn test_optional_fields() {
        let devices = catalog();
        assert_eq!(devices[0].device.latest_version_code(), Some("15"));
        assert_eq!(devices[0].device.is_stable(), Some(true));
        assert_eq!(devices[1].device.latest_version_code(), None);
        assert_eq!(devices[2].device.maintainer, None);
    }

    #[test]
    fn test_skips_unusable_items() {
        let json = r#"{ "Brand": [ 42, { "name": "No codename" }, { "codename": "ok" } ] }"#;
        let devices = parse_catalog(json, "bynx").expect("parse");
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].device.codename, "ok");
    }

    #[test]
    fn test_rejects_non_object_document() {
        let result = parse_catalog("[]", "bellflower");
        assert!(matches!(result, Err(CatalogError::UnexpectedShape { .. })));

        let result = parse_catalog("{ not json", "bellflower");
        assert!(matches!(result, Err(CatalogError::JsonParse(_))));
    }

    #[test]
    fn test_brands() {
        assert_eq!(brands(&catalog()), vec!["All", "Xiaomi", "Google"]);
        assert_eq!(brands(&[]), vec!["All"]);
    }

    #[test]
    fn test_filter_by_brand_and_search() {
        let devices = catalog();

        assert_eq!(filter_devices(&devices, ALL_BRANDS, "").len(), 3);
        assert_eq!(filter_devices(&devices, "Xiaomi", "").len(), 2);
        assert_eq!(filter_devices(&devices, "Samsung", "").len(), 0);

        let hits = filter_devices(&devices, ALL_BRANDS, "PIXEL");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].device.codename, "panther");

        let hits = filter_devices(&devices, "Xiaomi", "ali");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].device.codename, "alioth");
    }

    #[test]
    fn test_find_device_exact() {
        let devices = catalog();
        assert!(find_device(&devices, "sweet").is_some());
        assert!(find_device(&devices, "Sweet").is_none());
        assert!(find_device(&devices, "missing").is_none());
    }

    #[test]
    fn test_catalog_device_serializes_flat() {
        let json = serde_json::to_value(&catalog()[2]).expect("serialize");
        assert_eq!(json["codename"], "panther");
        assert_eq!(json["brand"], "Google");
        assert!(json.get("device").is_none());
    }
}
