//! Command dispatch
//!
//! Runs one subcommand against the configured data endpoints and prints the
//! resulting page to stdout.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use tracing::info;

use lumine_changelog::FilterCriteria;

use crate::config::{Command, Config};
use crate::fetch::HttpSource;
use crate::handlers::{self, SiteContext};
use crate::render;

/// Build the handler context for a configuration
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be created.
pub fn context(config: &Config) -> Result<SiteContext> {
    let source = HttpSource::new(config.timeout()).context("Failed to create HTTP client")?;
    Ok(SiteContext {
        source: Arc::new(source),
        endpoints: config.endpoints(),
        branches: config.branches(),
        team_file: config.team_path(),
        today: Utc::now().date_naive(),
    })
}

/// Run the configured subcommand and return its output
///
/// # Errors
///
/// Returns an error if a required document cannot be fetched or parsed.
pub async fn execute(config: &Config, ctx: &SiteContext) -> Result<String> {
    let json = config.json;

    match config.command_or_default() {
        Command::Changelog { date, search } => {
            let criteria = FilterCriteria {
                selected_date: date.unwrap_or_default(),
                search_query: search.unwrap_or_default(),
            };
            let page = handlers::handle_changelog(ctx, criteria).await?;
            output(json, &page, render::changelog)
        }
        Command::Dates => {
            let dates = handlers::handle_dates(ctx).await?;
            output(json, &dates, |d| render::dates(d))
        }
        Command::Devices { brand, search } => {
            let page = handlers::handle_devices(
                ctx,
                brand.as_deref(),
                search.as_deref().unwrap_or_default(),
            )
            .await
            .context("Failed to fetch devices")?;
            output(json, &page, render::devices)
        }
        Command::Device { codename, variant } => {
            let detail = handlers::handle_device(ctx, &codename, variant.as_deref())
                .await
                .context("Failed to fetch device details")?;
            output(json, &detail, render::device)
        }
        Command::Stats { search } => {
            let page = handlers::handle_stats(ctx, search.as_deref().unwrap_or_default()).await?;
            output(json, &page, render::stats)
        }
        Command::Team => {
            let roster = handlers::handle_team(ctx)
                .await
                .context("Failed to load team")?;
            output(json, &roster, render::team)
        }
    }
}

fn output<T: Serialize>(json: bool, value: &T, text: impl Fn(&T) -> String) -> Result<String> {
    if json {
        let mut out = render::to_json(value).context("Failed to serialize output")?;
        out.push('\n');
        Ok(out)
    } else {
        Ok(text(value))
    }
}

/// Run the CLI with a validated configuration
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the command fails.
pub async fn run(config: Config) -> Result<()> {
    config.validate().context("Invalid configuration")?;

    let ctx = context(&config)?;
    info!(
        branches = ?ctx.branches,
        base_url = ctx.endpoints.base_url(),
        "Loading site data"
    );

    let out = execute(&config, &ctx).await?;
    print!("{out}");
    Ok(())
}
