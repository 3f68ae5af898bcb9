//! Configuration for the lumine-site CLI
//!
//! This module provides configuration types and utilities for the CLI,
//! including data endpoints, release branches, the team roster file and
//! logging options.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::endpoints::{DEFAULT_BASE_URL, Endpoints};
use lumine_catalog::stats::DEFAULT_STATS_BASE;

/// Release branches queried when none are given
pub const DEFAULT_BRANCHES: &[&str] = &["bellflower", "bynx"];

/// Request timeout used when none is given
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// LumineDroid site data - changelogs, downloads, stats and team
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "lumine-site")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Subcommand to run (defaults to `changelog`)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Base URL of the published device data, without the branch segment
    ///
    /// Defaults to the official_devices repository on raw.githubusercontent.com.
    #[arg(long, env = "LUMINE_BASE_URL")]
    pub base_url: Option<String>,

    /// Base URL of the per-device download counters
    #[arg(long, env = "LUMINE_STATS_URL")]
    pub stats_url: Option<String>,

    /// Release branch to query (repeatable or comma separated)
    ///
    /// Defaults to bellflower and bynx. The first branch is the one whose
    /// device catalog is used for device pages and the team roster.
    #[arg(short, long = "branch", env = "LUMINE_BRANCHES", value_delimiter = ',')]
    pub branches: Vec<String>,

    /// HTTP request timeout in seconds
    #[arg(long, env = "LUMINE_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Path to the core team roster (team.json)
    ///
    /// Defaults to ~/.local/share/lumine/team.json (or platform equivalent).
    #[arg(long, env = "LUMINE_TEAM_FILE")]
    pub team_file: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, default_value = "false")]
    pub json: bool,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so they never mix with command output.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the merged changelog of all branches, newest first
    Changelog {
        /// Only show entries whose header equals this label exactly
        #[arg(long)]
        date: Option<String>,

        /// Only show entries mentioning this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
    },

    /// List the distinct release dates found in the changelogs
    Dates,

    /// List supported devices
    Devices {
        /// Only show devices of this brand ("All" for every brand)
        #[arg(long)]
        brand: Option<String>,

        /// Only show devices whose name or codename contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show build details and changelog for one device
    Device {
        /// Device codename (e.g. alioth)
        codename: String,

        /// Branch to show; unknown branches fall back to the first configured one
        #[arg(long)]
        variant: Option<String>,
    },

    /// Show download counts per device, most downloaded first
    Stats {
        /// Only show devices whose name or codename contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show the core team and device maintainers
    Team,
}

impl Config {
    /// Get the subcommand, defaulting to an unfiltered changelog
    #[must_use]
    pub fn command_or_default(&self) -> Command {
        self.command.clone().unwrap_or(Command::Changelog {
            date: None,
            search: None,
        })
    }

    /// Get the branches to query, using the defaults if none were given
    #[must_use]
    pub fn branches(&self) -> Vec<String> {
        if self.branches.is_empty() {
            DEFAULT_BRANCHES.iter().map(ToString::to_string).collect()
        } else {
            self.branches.clone()
        }
    }

    /// Get the data endpoints
    #[must_use]
    pub fn endpoints(&self) -> Endpoints {
        Endpoints::new(
            self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL),
            self.stats_url.as_deref().unwrap_or(DEFAULT_STATS_BASE),
        )
    }

    /// Get the HTTP request timeout
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Get the team roster path, using a default if not specified
    ///
    /// Default location is platform-specific:
    /// - macOS: ~/Library/Application Support/lumine/team.json
    /// - Linux: ~/.local/share/lumine/team.json
    /// - Windows: %LOCALAPPDATA%\lumine\team.json
    #[must_use]
    pub fn team_path(&self) -> PathBuf {
        self.team_file.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("lumine")
                .join("team.json")
        })
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A base URL is not an http(s) URL
    /// - A branch name is empty or contains a path separator
    /// - The timeout is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        for url in [&self.base_url, &self.stats_url].into_iter().flatten() {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidUrl(url.clone()));
            }
        }

        if let Some(bad) = self
            .branches
            .iter()
            .find(|b| b.trim().is_empty() || b.contains('/'))
        {
            return Err(ConfigError::InvalidBranch(bad.clone()));
        }

        if self.timeout_secs == Some(0) {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// URL is not http(s)
    #[error("Invalid URL (expected http:// or https://): {0}")]
    InvalidUrl(String),

    /// Branch name cannot be used in a URL path
    #[error("Invalid branch name: '{0}'")]
    InvalidBranch(String),

    /// Timeout of zero seconds
    #[error("Timeout must be at least one second")]
    ZeroTimeout,
}
