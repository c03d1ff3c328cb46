//! Batch analysis runner.
//!
//! Reads candidate URLs from a file or stdin (optionally extracting them from
//! SMS message bodies first) and analyzes them concurrently under a
//! semaphore. Each task prints its outcome as it completes; a background task
//! logs progress at a fixed interval until the batch drains.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::*;
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::{info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

use crate::analysis::{analyze_url_with_cancel, AnalysisContext};
use crate::app::{log_progress, print_signal_statistics};
use crate::config::{Config, OutputFormat, LOGGING_INTERVAL_SECS};
use crate::initialization::init_semaphore;
use crate::models::{AnalysisOutcome, RiskTier};
use crate::sms::extract_links;

/// Summary of a completed batch run.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Number of candidate URLs analyzed.
    pub total: usize,
    /// Outcomes in the low-risk tier.
    pub low: usize,
    /// Outcomes in the medium-risk tier.
    pub medium: usize,
    /// Outcomes in the high-risk tier.
    pub high: usize,
    /// Outcomes that ended in a terminal failure.
    pub terminal_failures: usize,
    /// Elapsed wall-clock time in seconds.
    pub elapsed_seconds: f64,
}

/// Reads candidate lines from the configured input.
///
/// Empty lines and `#` comments are skipped. With `--sms`, lines are message
/// bodies and the embedded URLs become the candidates.
async fn read_candidates(config: &Config) -> Result<Vec<String>> {
    let Some(path) = &config.file else {
        return Ok(Vec::new());
    };

    let mut lines = Vec::new();
    if path.as_os_str() == "-" {
        info!("Reading input from stdin");
        let mut reader = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = reader.next_line().await.context("Failed to read stdin")? {
            lines.push(line);
        }
    } else {
        let file = tokio::fs::File::open(path)
            .await
            .with_context(|| format!("Failed to open input file {}", path.display()))?;
        let mut reader = BufReader::new(file).lines();
        while let Some(line) = reader
            .next_line()
            .await
            .context("Failed to read input file")?
        {
            lines.push(line);
        }
    }

    let lines: Vec<String> = lines
        .into_iter()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();

    if config.sms {
        let candidates = extract_links(lines.iter().map(String::as_str));
        info!(
            "Extracted {} URL candidate(s) from {} message(s)",
            candidates.len(),
            lines.len()
        );
        Ok(candidates)
    } else {
        Ok(lines)
    }
}

/// Prints one outcome in the configured format.
pub fn print_outcome(url: &str, outcome: &AnalysisOutcome, format: &OutputFormat) {
    match format {
        OutputFormat::Json => {
            let mut value = serde_json::json!({ "url": url });
            if let Ok(serde_json::Value::Object(fields)) = serde_json::to_value(outcome) {
                if let Some(object) = value.as_object_mut() {
                    object.extend(fields);
                }
            }
            println!("{value}");
        }
        OutputFormat::Text => {
            let tier = outcome.tier.as_str();
            let colored_tier = match outcome.tier {
                RiskTier::High => tier.red(),
                RiskTier::Medium => tier.yellow(),
                RiskTier::Low => tier.green(),
            };
            println!("{url}: {} [{}]", outcome.label, colored_tier);
        }
    }
}

/// Runs a batch analysis with the provided configuration.
///
/// # Errors
///
/// Returns an error if the input cannot be read or shared resources fail to
/// initialize. Per-URL failures never error out the batch; they surface as
/// terminal outcomes.
pub async fn run_batch(config: Config) -> Result<BatchReport> {
    let candidates = read_candidates(&config).await?;
    let total = candidates.len();
    info!("Analyzing {} candidate URL(s)", total);

    let ctx = Arc::new(AnalysisContext::from_config(&config).context("Failed to initialize")?);
    let semaphore = init_semaphore(config.max_concurrency);

    let start_time = std::time::Instant::now();
    let completed = Arc::new(AtomicUsize::new(0));
    let low = Arc::new(AtomicUsize::new(0));
    let medium = Arc::new(AtomicUsize::new(0));
    let high = Arc::new(AtomicUsize::new(0));
    let terminal_failures = Arc::new(AtomicUsize::new(0));

    let cancel = CancellationToken::new();
    let cancel_logging = cancel.child_token();
    let completed_for_logging = Arc::clone(&completed);
    let logging_task = tokio::spawn(async move {
        let mut interval =
            tokio::time::interval(std::time::Duration::from_secs(LOGGING_INTERVAL_SECS));
        interval.tick().await; // first tick fires immediately
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    log_progress(start_time, &completed_for_logging, total);
                }
                _ = cancel_logging.cancelled() => {
                    break;
                }
            }
        }
    });

    let mut tasks = FuturesUnordered::new();
    for url in candidates {
        let permit = match Arc::clone(&semaphore).acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => {
                warn!("Semaphore closed, skipping URL: {url}");
                continue;
            }
        };

        let ctx = Arc::clone(&ctx);
        let completed = Arc::clone(&completed);
        let low = Arc::clone(&low);
        let medium = Arc::clone(&medium);
        let high = Arc::clone(&high);
        let terminal_failures = Arc::clone(&terminal_failures);
        let cancel = cancel.child_token();
        let output = config.output.clone();

        tasks.push(tokio::spawn(async move {
            let _permit = permit;
            let outcome = analyze_url_with_cancel(&url, &ctx, &cancel).await;

            completed.fetch_add(1, Ordering::SeqCst);
            if outcome.terminal {
                terminal_failures.fetch_add(1, Ordering::SeqCst);
            }
            match outcome.tier {
                RiskTier::Low => low.fetch_add(1, Ordering::SeqCst),
                RiskTier::Medium => medium.fetch_add(1, Ordering::SeqCst),
                RiskTier::High => high.fetch_add(1, Ordering::SeqCst),
            };

            print_outcome(&url, &outcome, &output);
        }));
    }

    while let Some(task_result) = tasks.next().await {
        if let Err(join_error) = task_result {
            warn!("Analysis task panicked: {:?}", join_error);
        }
    }

    cancel.cancel();
    if let Err(e) = logging_task.await {
        warn!("Progress logging task failed: {e}");
    }

    let elapsed_seconds = start_time.elapsed().as_secs_f64();
    log_progress(start_time, &completed, total);
    print_signal_statistics(&ctx.stats);

    Ok(BatchReport {
        total,
        low: low.load(Ordering::SeqCst),
        medium: medium.load(Ordering::SeqCst),
        high: high.load(Ordering::SeqCst),
        terminal_failures: terminal_failures.load(Ordering::SeqCst),
        elapsed_seconds,
    })
}
