//! Text rendering of page models
//!
//! Every function returns the full text of one page. Output never carries
//! ANSI styling so it can be piped.

use std::fmt::Write as _;

use serde::Serialize;

use lumine_catalog::team::{github_profile_url, telegram_profile_url};
use lumine_catalog::{DeviceDetail, Roster, format_size, format_timestamp};
use lumine_changelog::format_date;

use crate::handlers::{ChangelogPage, DevicesPage, StatsPage};

/// Changelog lines shown on a device page before truncation
const DEVICE_CHANGELOG_PREVIEW: usize = 10;

const NO_MATCHES: &str = "No changelogs match your search. Try adjusting your filters.";
const NO_CHANGELOGS: &str = "No changelogs found. Check back later for updates!";

/// Pretty JSON for `--json` output
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

fn plural(count: usize, one: &str, many: &str) -> String {
    format!("{count} {}", if count == 1 { one } else { many })
}

/// Changelog page: filter summary, then one block per entry
#[must_use]
pub fn changelog(page: &ChangelogPage) -> String {
    let mut out = String::new();

    if !page.criteria.is_empty() {
        let _ = writeln!(
            out,
            "Filters: {}",
            plural(page.entries.len(), "result", "results")
        );
        out.push('\n');
    }

    if page.entries.is_empty() {
        let message = if page.criteria.is_empty() {
            NO_CHANGELOGS
        } else {
            NO_MATCHES
        };
        out.push_str(message);
        out.push('\n');
        return out;
    }

    for (i, entry) in page.entries.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{}", entry.display_date());
        if entry.changes.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{}", entry.to_markdown());
    }
    out
}

/// Date labels with their display form, one per line
#[must_use]
pub fn dates(dates: &[String]) -> String {
    dates
        .iter()
        .map(|d| {
            let pretty = format_date(d);
            if pretty == *d {
                format!("{d}\n")
            } else {
                format!("{d}  ({pretty})\n")
            }
        })
        .collect()
}

/// Device list, one block per device with its brand and latest Android version
#[must_use]
pub fn devices(page: &DevicesPage) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Brands: {}", page.brands.join(", "));
    let _ = writeln!(
        out,
        "{} on {}",
        plural(page.devices.len(), "device", "devices"),
        page.branch
    );

    for entry in &page.devices {
        let device = &entry.device;
        let _ = write!(out, "\n{} ({}) - {}", device.name, device.codename, entry.brand);
        if let Some(maintainer) = &device.maintainer {
            let _ = write!(out, ", maintained by {maintainer}");
        }
        if let Some(version) = device.latest_version_code() {
            let channel = match device.is_stable() {
                Some(false) => " (beta)",
                _ => "",
            };
            let _ = write!(out, ", Android {version}{channel}");
        }
        out.push('\n');
    }
    out
}

/// Device page with build details and a truncated changelog
#[must_use]
pub fn device(detail: &DeviceDetail) -> String {
    let device = &detail.device.device;
    let mut out = String::new();

    let _ = writeln!(out, "{} ({})", device.name, device.codename);
    let _ = writeln!(out, "Brand:      {}", detail.device.brand);
    let _ = writeln!(out, "Variant:    {}", detail.branch);
    if let Some(maintainer) = &device.maintainer {
        let _ = writeln!(out, "Maintainer: {maintainer}");
    }
    if let Some(forum) = &device.forum {
        let _ = writeln!(out, "Support:    {forum}");
    }
    let _ = writeln!(out, "Image:      {}", detail.device.image);

    out.push('\n');
    match &detail.build {
        Some(build) => {
            if let Some(version) = &build.version {
                let _ = writeln!(out, "Version:    {version}");
            }
            let _ = writeln!(out, "Size:       {}", format_size(build.size));
            let _ = writeln!(out, "Released:   {}", format_timestamp(build.datetime));
            if let Some(filename) = &build.filename {
                let _ = writeln!(out, "File:       {filename}");
            }
            if let Some(md5) = &build.md5 {
                let _ = writeln!(out, "MD5:        {md5}");
            }
            if let Some(sha256) = &build.sha256 {
                let _ = writeln!(out, "SHA256:     {sha256}");
            }
            if let Some(download) = &build.download {
                let _ = writeln!(out, "Download:   {download}");
            }
        }
        None => {
            let _ = writeln!(out, "No build published on {}.", detail.branch);
        }
    }

    out.push_str("\nChangelog\n");
    let (lines, truncated) = detail.changelog_preview(DEVICE_CHANGELOG_PREVIEW);
    for line in lines {
        let _ = writeln!(out, "  {line}");
    }
    if truncated {
        out.push_str("  ...\n");
    }
    out
}

/// Download table, most downloaded first
#[must_use]
pub fn stats(page: &StatsPage) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total downloads: {}", page.total_downloads);
    if page.devices.is_empty() {
        out.push_str("\nNo devices found.\n");
        return out;
    }

    let width = page
        .devices
        .iter()
        .map(|d| d.name.len() + d.codename.len() + 3)
        .max()
        .unwrap_or(0);
    out.push('\n');
    for (rank, row) in page.devices.iter().enumerate() {
        let label = format!("{} ({})", row.name, row.codename);
        let _ = writeln!(out, "{:>3}. {label:<width$}  {}", rank + 1, row.downloads);
    }
    out
}

/// Core team followed by device maintainers
#[must_use]
pub fn team(roster: &Roster) -> String {
    let mut out = String::from("Core team\n");

    for core in &roster.core {
        let member = &core.member;
        let _ = write!(out, "\n{}", member.name);
        if let Some(role) = &member.role {
            let _ = write!(out, " - {role}");
        }
        out.push('\n');
        if let Some(description) = &member.description
            && member.role.as_ref() != Some(description)
        {
            let _ = writeln!(out, "  {description}");
        }
        if let Some(role) = &core.maintainer_role {
            let _ = writeln!(out, "  Maintains: {role}");
        }
        for link in [
            github_profile_url(member.github.as_deref()),
            telegram_profile_url(member.telegram.as_deref()),
            member.email.as_ref().map(|e| format!("mailto:{e}")),
            member.linkedin.clone(),
        ]
        .into_iter()
        .flatten()
        {
            let _ = writeln!(out, "  {link}");
        }
    }

    if !roster.maintainers.is_empty() {
        out.push_str("\nDevice maintainers\n");
        for maintainer in &roster.maintainers {
            let _ = writeln!(out, "\n{}", maintainer.name);
            let _ = writeln!(out, "  Maintains: {}", maintainer.role);
            for link in [
                github_profile_url(Some(maintainer.github.as_str())),
                telegram_profile_url(Some(maintainer.telegram.as_str())),
            ]
            .into_iter()
            .flatten()
            {
                let _ = writeln!(out, "  {link}");
            }
        }
    }
    out
}
