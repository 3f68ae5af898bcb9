//! Page handlers
//!
//! Each handler gathers the documents one site page needs and returns a
//! serializable page model. Handlers never print; rendering is done by the
//! caller.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use futures::future::join_all;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use lumine_catalog::device::ALL_BRANDS;
use lumine_catalog::stats::parse_download_total;
use lumine_catalog::{
    BuildInfo, CatalogDevice, CatalogError, DeviceDetail, DownloadStats, RankedDevice, Roster,
    brands, build_roster, filter_devices, find_device, parse_catalog, parse_team, resolve_variant,
    unique_devices,
};
use lumine_changelog::{ChangelogEntry, FilterCriteria, unique_dates};

use crate::aggregate::aggregate;
use crate::endpoints::Endpoints;
use crate::fetch::{FetchError, TextSource};
use crate::view::ChangelogView;

// ============================================================================
// Error Types
// ============================================================================

/// Handler errors
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Branch changelogs could not be loaded
    #[error(transparent)]
    Changelog(FetchError),

    /// A required document could not be fetched
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A fetched document could not be understood
    #[error("Invalid {document}: {source}")]
    Catalog {
        document: String,
        #[source]
        source: CatalogError,
    },

    /// Codename not in the catalog
    #[error("Device not found: {0}. Use 'devices' to list supported devices.")]
    DeviceNotFound(String),

    /// No branch configured
    #[error("No release branch configured. Pass at least one --branch.")]
    NoBranch,

    /// The team roster file could not be read
    #[error("Failed to read team roster {}: {source}", .path.display())]
    TeamFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ============================================================================
// Context
// ============================================================================

/// What every handler needs to reach the data
#[derive(Clone)]
pub struct SiteContext {
    /// Document source
    pub source: Arc<dyn TextSource>,
    /// Document URLs
    pub endpoints: Endpoints,
    /// Release branches, the first one is primary
    pub branches: Vec<String>,
    /// Core team roster
    pub team_file: PathBuf,
    /// End date for download counters
    pub today: NaiveDate,
}

impl SiteContext {
    /// Branch whose catalog backs the device pages and the team roster
    ///
    /// # Errors
    ///
    /// Returns `HandlerError::NoBranch` when no branch is configured.
    pub fn primary_branch(&self) -> Result<&str, HandlerError> {
        self.branches
            .first()
            .map(String::as_str)
            .ok_or(HandlerError::NoBranch)
    }
}

// ============================================================================
// Output Types
// ============================================================================

/// The changelog page
#[derive(Debug, Clone, Serialize)]
pub struct ChangelogPage {
    /// Number of loaded entries before filtering
    pub total: usize,
    /// Entries passing the filters, newest first
    pub entries: Vec<ChangelogEntry>,
    /// Date labels offered by the date selector
    pub available_dates: Vec<String>,
    /// Filters that were applied
    pub criteria: FilterCriteria,
}

/// The device list page
#[derive(Debug, Clone, Serialize)]
pub struct DevicesPage {
    /// Branch the catalog was read from
    pub branch: String,
    /// Brand selector values, `All` first
    pub brands: Vec<String>,
    /// Devices passing the brand and search filters
    pub devices: Vec<CatalogDevice>,
}

/// The download statistics page
#[derive(Debug, Clone, Serialize)]
pub struct StatsPage {
    /// Downloads over every device and branch
    pub total_downloads: u64,
    /// Matching devices, most downloaded first
    pub devices: Vec<RankedDevice>,
}

// ============================================================================
// Helpers
// ============================================================================

async fn fetch_catalog(
    ctx: &SiteContext,
    branch: &str,
) -> Result<Vec<CatalogDevice>, HandlerError> {
    let json = ctx
        .source
        .fetch_text(&ctx.endpoints.catalog_url(branch))
        .await?;
    parse_catalog(&json, branch).map_err(|source| HandlerError::Catalog {
        document: format!("{branch}/devices.json"),
        source,
    })
}

async fn fetch_build(ctx: &SiteContext, branch: &str, codename: &str) -> Option<BuildInfo> {
    let url = ctx.endpoints.build_url(branch, codename);
    let json = match ctx.source.fetch_text(&url).await {
        Ok(json) => json,
        Err(e) => {
            debug!(url = %url, error = %e, "No build metadata");
            return None;
        }
    };
    match BuildInfo::from_api_json(&json) {
        Ok(build) => build,
        Err(e) => {
            warn!(url = %url, error = %e, "Ignoring malformed build metadata");
            None
        }
    }
}

async fn fetch_device_changelog(ctx: &SiteContext, branch: &str, codename: &str) -> Option<String> {
    let url = ctx.endpoints.device_changelog_url(branch, codename);
    match ctx.source.fetch_text(&url).await {
        Ok(text) => Some(text),
        Err(e) => {
            debug!(url = %url, error = %e, "No device changelog");
            None
        }
    }
}

async fn fetch_download_total(ctx: &SiteContext, codename: &str, branch: &str) -> u64 {
    let url = ctx.endpoints.stats_url(codename, branch, ctx.today);
    match ctx.source.fetch_text(&url).await {
        Ok(json) => parse_download_total(&json),
        Err(e) => {
            debug!(url = %url, error = %e, "Counting unavailable downloads as 0");
            0
        }
    }
}

// ============================================================================
// Handler Functions
// ============================================================================

/// Handle the changelog page
///
/// Loads every branch changelog and applies `criteria`. Fails as a whole if
/// any branch cannot be fetched.
pub async fn handle_changelog(
    ctx: &SiteContext,
    criteria: FilterCriteria,
) -> Result<ChangelogPage, HandlerError> {
    let mut view = ChangelogView::new();
    view.set_criteria(criteria);

    let ticket = view.begin_load();
    let entries = aggregate(ctx.source.as_ref(), &ctx.endpoints, &ctx.branches)
        .await
        .map_err(HandlerError::Changelog)?;
    view.finish_load(ticket, Ok(entries));

    Ok(ChangelogPage {
        total: view.entries().len(),
        entries: view.visible().to_vec(),
        available_dates: view.dates().to_vec(),
        criteria: view.criteria().clone(),
    })
}

/// Handle the date selector
///
/// Returns distinct date labels, descending.
pub async fn handle_dates(ctx: &SiteContext) -> Result<Vec<String>, HandlerError> {
    let entries = aggregate(ctx.source.as_ref(), &ctx.endpoints, &ctx.branches)
        .await
        .map_err(HandlerError::Changelog)?;
    Ok(unique_dates(&entries))
}

/// Handle the device list page
///
/// Reads the primary branch catalog. `brand` defaults to every brand.
pub async fn handle_devices(
    ctx: &SiteContext,
    brand: Option<&str>,
    search: &str,
) -> Result<DevicesPage, HandlerError> {
    let branch = ctx.primary_branch()?;
    let catalog = fetch_catalog(ctx, branch).await?;

    let devices = filter_devices(&catalog, brand.unwrap_or(ALL_BRANDS), search)
        .into_iter()
        .cloned()
        .collect();

    Ok(DevicesPage {
        branch: branch.to_string(),
        brands: brands(&catalog),
        devices,
    })
}

/// Handle the device download page
///
/// The device record comes from the primary branch catalog. Build metadata
/// and changelog come from the requested variant and are optional.
pub async fn handle_device(
    ctx: &SiteContext,
    codename: &str,
    variant: Option<&str>,
) -> Result<DeviceDetail, HandlerError> {
    let primary = ctx.primary_branch()?;
    let branch = resolve_variant(variant, &ctx.branches).unwrap_or(primary);
    if let Some(requested) = variant
        && requested != branch
    {
        warn!(requested, using = branch, "Unknown variant, using default branch");
    }

    let catalog = fetch_catalog(ctx, primary).await?;
    let device = find_device(&catalog, codename)
        .cloned()
        .ok_or_else(|| HandlerError::DeviceNotFound(codename.to_string()))?;

    let (build, changelog) = tokio::join!(
        fetch_build(ctx, branch, codename),
        fetch_device_changelog(ctx, branch, codename)
    );

    Ok(DeviceDetail::new(device, branch, build, changelog))
}

/// Handle the download statistics page
///
/// Devices are collected from every branch catalog; a branch whose catalog
/// fails contributes no devices. Each device counter is fetched per branch
/// and unavailable counters count as zero.
pub async fn handle_stats(ctx: &SiteContext, search: &str) -> Result<StatsPage, HandlerError> {
    let catalogs = join_all(ctx.branches.iter().map(move |branch| async move {
        match fetch_catalog(ctx, branch).await {
            Ok(devices) => devices,
            Err(e) => {
                warn!(branch = %branch, error = %e, "Skipping branch catalog");
                Vec::new()
            }
        }
    }))
    .await;

    let devices = unique_devices(catalogs.iter().flatten().map(|d| &d.device));
    debug!(devices = devices.len(), "Fetching download counters");

    let branches = ctx.branches.as_slice();
    let lookups = devices.iter().flat_map(move |device| {
        branches.iter().map(move |branch| async move {
            let total = fetch_download_total(ctx, &device.codename, branch).await;
            (device.codename.as_str(), total)
        })
    });
    let totals = join_all(lookups).await;

    let mut stats = DownloadStats::new(devices.clone());
    for (codename, total) in totals {
        stats.record(codename, total);
    }

    info!(total = stats.grand_total(), "Collected download statistics");
    Ok(StatsPage {
        total_downloads: stats.grand_total(),
        devices: stats.ranked(search),
    })
}

/// Handle the team page
///
/// The roster file is required. The primary branch catalog is optional; when
/// it cannot be loaded the core team is returned without maintainers.
pub async fn handle_team(ctx: &SiteContext) -> Result<Roster, HandlerError> {
    let json = tokio::fs::read_to_string(&ctx.team_file)
        .await
        .map_err(|source| HandlerError::TeamFile {
            path: ctx.team_file.clone(),
            source,
        })?;
    let team = parse_team(&json).map_err(|source| HandlerError::Catalog {
        document: ctx.team_file.display().to_string(),
        source,
    })?;

    let devices = match fetch_catalog(ctx, ctx.primary_branch()?).await {
        Ok(devices) => devices,
        Err(e) => {
            warn!(error = %e, "Device catalog unavailable, showing core team only");
            Vec::new()
        }
    };

    Ok(build_roster(team, &devices))
}
