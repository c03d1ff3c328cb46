//! The analysis pipeline.
//!
//! Stages run in a fixed order — validate, transport probe, certificate
//! inspection, content fetch, host heuristics, content scoring — and each
//! returns a [`StageResult`]: signals to merge forward, or a terminal failure
//! that fixes the score and stops evaluation. Every request produces exactly
//! one [`AnalysisOutcome`]; unexpected errors are caught at the pipeline
//! boundary and folded into a terminal outcome rather than surfaced as `Err`.

pub mod certificate;
pub mod content;
pub mod host;
pub mod transport;
pub mod validate;

use std::sync::Arc;

use anyhow::Result;
use hickory_resolver::TokioAsyncResolver;
use tokio_util::sync::CancellationToken;

use crate::config::{Config, ANALYSIS_DEADLINE};
use crate::error_handling::{AnalysisStats, InitializationError};
use crate::initialization::{init_content_client, init_probe_client, init_resolver};
use crate::models::{AnalysisOutcome, StageResult, TerminalFailure};

/// Shared, read-only resources for analysis tasks.
///
/// One context serves any number of concurrent requests: it holds only
/// clients, the resolver, and additive statistics counters. Request-local
/// state never lives here.
pub struct AnalysisContext {
    /// Client for the transport probe (redirects followed, probe timeout).
    pub probe_client: Arc<reqwest::Client>,
    /// Client for the document fetch (its own, larger timeout).
    pub content_client: Arc<reqwest::Client>,
    /// DNS resolver for the host heuristics.
    pub resolver: Arc<TokioAsyncResolver>,
    /// Batch statistics, shared across tasks.
    pub stats: Arc<AnalysisStats>,
}

impl AnalysisContext {
    /// Builds a context from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client or resolver construction fails.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(AnalysisContext {
            probe_client: init_probe_client(config).map_err(InitializationError::from)?,
            content_client: init_content_client(config).map_err(InitializationError::from)?,
            resolver: init_resolver()?,
            stats: Arc::new(AnalysisStats::new()),
        })
    }
}

/// Analyzes a single URL and returns its outcome.
///
/// Never returns an error and never hangs: the whole pipeline runs under
/// [`ANALYSIS_DEADLINE`], and any unexpected internal error becomes a
/// terminal outcome carrying the error text. The outcome (and its terminal
/// failure kind, if any) is recorded into the context's statistics.
pub async fn analyze_url(raw: &str, ctx: &AnalysisContext) -> AnalysisOutcome {
    analyze_url_with_cancel(raw, ctx, &CancellationToken::new()).await
}

/// Like [`analyze_url`], but abortable through a caller-owned token.
///
/// Cancellation and deadline expiry both yield a terminal outcome so the
/// caller still receives exactly one result.
pub async fn analyze_url_with_cancel(
    raw: &str,
    ctx: &AnalysisContext,
    cancel: &CancellationToken,
) -> AnalysisOutcome {
    let outcome = tokio::select! {
        result = tokio::time::timeout(ANALYSIS_DEADLINE, run_pipeline(raw, ctx)) => {
            match result {
                Ok(Ok(outcome)) => outcome,
                Ok(Err(e)) => {
                    log::warn!("Unexpected error analyzing {raw}: {e:#}");
                    AnalysisOutcome::terminal(&TerminalFailure::Internal(format!("{e:#}")))
                }
                Err(_) => {
                    log::warn!(
                        "Analysis deadline ({}s) exceeded for {raw}",
                        ANALYSIS_DEADLINE.as_secs()
                    );
                    AnalysisOutcome::terminal(&TerminalFailure::Internal(
                        "analysis deadline exceeded".to_string(),
                    ))
                }
            }
        }
        _ = cancel.cancelled() => {
            log::debug!("Analysis cancelled for {raw}");
            AnalysisOutcome::terminal(&TerminalFailure::Internal(
                "analysis cancelled".to_string(),
            ))
        }
    };

    ctx.stats.record_outcome(&outcome, outcome.failure);
    outcome
}

/// Runs the stage chain, accumulating signals until completion or a terminal
/// failure.
async fn run_pipeline(raw: &str, ctx: &AnalysisContext) -> Result<AnalysisOutcome> {
    let mut signals = Vec::new();

    let url = match validate::validate(raw) {
        StageResult::Next { value, signals: s } => {
            signals.extend(s);
            value
        }
        StageResult::Terminal(failure) => return Ok(AnalysisOutcome::terminal(&failure)),
    };

    let transport = match transport::probe(&url, raw, ctx).await {
        StageResult::Next { value, signals: s } => {
            signals.extend(s);
            value
        }
        StageResult::Terminal(failure) => return Ok(AnalysisOutcome::terminal(&failure)),
    };

    if let Some(chain) = &transport.cert_chain {
        let verdict = certificate::inspect(chain);
        if let Some(signal) = certificate::verdict_signal(verdict) {
            signals.push(signal);
        }
    }

    let page = match content::fetch_page(&url, ctx).await {
        StageResult::Next { value, signals: s } => {
            signals.extend(s);
            value
        }
        StageResult::Terminal(failure) => return Ok(AnalysisOutcome::terminal(&failure)),
    };

    signals.extend(host::evaluate(&url, raw, ctx).await);
    signals.extend(crate::scoring::evaluate(raw, &url, &transport, &page));

    Ok(AnalysisOutcome::from_signals(signals))
}
