//! lumine-site: LumineDroid site data from the command line
//!
//! Fetches the published changelogs, device catalog, build metadata,
//! download counters and team roster, and prints them as text or JSON.

use clap::Parser;

use lumine_site::cli;
use lumine_site::config::Config;

#[tokio::main]
async fn main() {
    let config = Config::parse();

    // Logs go to stderr so stdout stays parseable with --json
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(config.log_level().into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = cli::run(config).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
