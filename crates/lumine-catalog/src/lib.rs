// Copyright (c) 2026 - present LumineDroid Team
// SPDX-License-Identifier: MIT

//! lumine-catalog: published device data for LumineDroid
//!
//! This library crate models the JSON documents published alongside each
//! release branch (device catalog, per-device build metadata, download
//! counters) and the local team roster, and provides the reshaping used by
//! the download, statistics and team views.
//!
//! All documents are loosely typed upstream, so every record uses optional
//! or defaulted fields and tolerates unknown keys.

#![warn(missing_docs)]

mod de;

pub mod build;
pub mod device;
pub mod error;
pub mod stats;
pub mod team;

pub use build::{BuildInfo, DeviceDetail, format_size, format_timestamp, resolve_variant};
pub use device::{CatalogDevice, Device, brands, filter_devices, find_device, parse_catalog};
pub use error::CatalogError;
pub use stats::{DownloadStats, RankedDevice, StatsDevice, unique_devices};
pub use team::{CoreMember, Maintainer, Roster, TeamMember, build_roster, parse_team};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::build::{BuildInfo, DeviceDetail};
    pub use crate::device::{CatalogDevice, Device};
    pub use crate::error::CatalogError;
    pub use crate::stats::DownloadStats;
    pub use crate::team::Roster;
}
