//! isbnsweep - ISBN hyphenation sweep bot for Wikidata
//!
//! Scans every ISBN-13 (P212) and ISBN-10 (P957) value, rewrites valid
//! but mis-hyphenated ones to their canonical form, and reports invalid
//! ones to a wiki page. Dry run by default; pass --live to write.

mod config;
mod sweep;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use config::SweepConfig;
use sweep::{BatchCorrector, SweepError};

#[derive(Parser, Debug)]
#[command(
    name = "isbnsweep",
    about = "Correct ISBN hyphenation on Wikidata and report invalid values"
)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Apply corrections instead of the default dry run
    #[arg(long)]
    live: bool,

    /// Do not publish the error report page
    #[arg(long)]
    no_publish: bool,

    /// Report page title override
    #[arg(long)]
    report_page: Option<String>,

    /// OAuth bearer token for write operations
    #[arg(long)]
    token: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SweepConfig::load(path).map_err(SweepError::Config)?,
        None => SweepConfig::default(),
    };
    if cli.live {
        config.dry_run = false;
    }
    if cli.no_publish {
        config.publish = false;
    }
    if let Some(page) = cli.report_page {
        config.report_page = page;
    }
    if let Some(token) = cli.token {
        config.oauth_token = Some(token);
    }

    if config.dry_run {
        tracing::info!("dry run: no writes will be issued");
    }

    let corrector = BatchCorrector::new(config);
    let report = corrector.run().await?;

    if report.is_empty() {
        println!("No invalid ISBNs found.");
    } else {
        println!("\n{report}");
    }

    Ok(())
}
