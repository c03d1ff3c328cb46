//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `link_risk` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use link_risk::initialization::{init_crypto_provider, init_logger_with};
use link_risk::{analyze_url, print_outcome, run_batch, AnalysisContext, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    // Must run before any TLS connection is attempted
    init_crypto_provider();

    if let Some(url) = config.url.clone() {
        let ctx = match AnalysisContext::from_config(&config) {
            Ok(ctx) => ctx,
            Err(e) => {
                eprintln!("link_risk error: {e:#}");
                process::exit(1);
            }
        };
        let outcome = analyze_url(&url, &ctx).await;
        print_outcome(&url, &outcome, &config.output);
        return Ok(());
    }

    match run_batch(config).await {
        Ok(report) => {
            println!(
                "Analyzed {} URL{} ({} low, {} medium, {} high, {} terminal failure{}) in {:.1}s",
                report.total,
                if report.total == 1 { "" } else { "s" },
                report.low,
                report.medium,
                report.high,
                report.terminal_failures,
                if report.terminal_failures == 1 { "" } else { "s" },
                report.elapsed_seconds
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("link_risk error: {e:#}");
            process::exit(1);
        }
    }
}
