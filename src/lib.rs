//! link_risk library: heuristic phishing-risk scoring for URLs.
//!
//! This library analyzes a URL through a staged pipeline — syntax validation,
//! transport probing (TLS certificate capture, status, redirects), content
//! fetching and parsing, and host heuristics — then aggregates weighted
//! signals into a single score with a risk tier. Every analysis yields
//! exactly one [`AnalysisOutcome`]; hard failures short-circuit the pipeline
//! with fixed terminal scores instead of surfacing errors.
//!
//! # Example
//!
//! ```no_run
//! use link_risk::{analyze_url, AnalysisContext, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! link_risk::initialization::init_crypto_provider();
//! let ctx = AnalysisContext::from_config(&Config::default())?;
//! let outcome = analyze_url("https://example.com", &ctx).await;
//! println!("{} ({})", outcome.label, outcome.tier.as_str());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

pub mod analysis;
mod app;
pub mod config;
mod error_handling;
pub mod initialization;
mod models;
mod run;
mod scoring;
mod sms;

// Re-export public API
pub use analysis::{analyze_url, analyze_url_with_cancel, AnalysisContext};
pub use config::{Config, LogFormat, LogLevel, OutputFormat};
pub use error_handling::AnalysisStats;
pub use models::{
    AnalysisOutcome, CertificateVerdict, FailureKind, PageContent, RiskTier, Signal, StageResult,
    TerminalFailure, TransportResult,
};
pub use run::{print_outcome, run_batch, BatchReport};
pub use sms::extract_links;
