//! Configuration types and CLI options.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    CONTENT_FETCH_TIMEOUT_SECS, DEFAULT_USER_AGENT, PROBE_TIMEOUT_SECS, SEMAPHORE_LIMIT,
};

/// Logging level for the application.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Per-outcome output format.
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One colored line per URL (default)
    Text,
    /// One JSON object per URL
    Json,
}

/// Application configuration, parsed from the command line or constructed
/// programmatically (all fields have defaults via `Default`).
#[derive(Debug, Clone, Parser)]
#[command(
    name = "link_risk",
    about = "Assigns a heuristic phishing-risk score to URLs",
    version
)]
pub struct Config {
    /// File of candidate URLs, one per line ("-" reads stdin).
    /// With --sms, lines are treated as message bodies to extract URLs from.
    #[arg(required_unless_present = "url")]
    pub file: Option<PathBuf>,

    /// Analyze a single URL instead of reading a file
    #[arg(long)]
    pub url: Option<String>,

    /// Treat input lines as SMS message bodies and extract embedded URLs
    #[arg(long)]
    pub sms: bool,

    /// Per-outcome output format
    #[arg(long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,

    /// Maximum concurrent analyses
    #[arg(long, default_value_t = SEMAPHORE_LIMIT)]
    pub max_concurrency: usize,

    /// Connection timeout for the transport probe, in seconds
    #[arg(long, default_value_t = PROBE_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Timeout for the document fetch, in seconds
    #[arg(long, default_value_t = CONTENT_FETCH_TIMEOUT_SECS)]
    pub content_timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            file: None,
            url: None,
            sms: false,
            output: OutputFormat::Text,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            max_concurrency: SEMAPHORE_LIMIT,
            timeout_seconds: PROBE_TIMEOUT_SECS,
            content_timeout_seconds: CONTENT_FETCH_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
