//! Configuration constants.
//!
//! Timeouts, limits, and the static rule-table inputs (keyword, TLD, and
//! shortener lists). All of this is process-wide read-only configuration:
//! loaded once at compile time, never mutated.

use std::time::Duration;

/// Maximum concurrent analysis tasks (semaphore limit).
pub const SEMAPHORE_LIMIT: usize = 20;
/// Interval between progress log lines in seconds.
pub const LOGGING_INTERVAL_SECS: u64 = 5;

// Network operation timeouts
/// Connection timeout for the HTTP-level probe in seconds.
pub const PROBE_TIMEOUT_SECS: u64 = 5;
/// TCP connection timeout for the raw TLS capture in seconds.
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;
/// TLS handshake timeout in seconds.
pub const TLS_HANDSHAKE_TIMEOUT_SECS: u64 = 5;
/// Document fetch timeout in seconds.
///
/// The content fetch is a separate request from the transport probe and would
/// otherwise block without bound; it gets its own, slightly larger budget.
pub const CONTENT_FETCH_TIMEOUT_SECS: u64 = 10;
/// DNS query timeout in seconds.
pub const DNS_TIMEOUT_SECS: u64 = 3;
/// Overall per-request deadline covering every pipeline stage.
pub const ANALYSIS_DEADLINE: Duration = Duration::from_secs(30);

/// Maximum URL length accepted by the syntax validator.
/// Matches common browser and server limits.
pub const MAX_URL_LENGTH: usize = 2048;

/// Default User-Agent string for HTTP requests.
///
/// A generic Chrome-like string; some phishing pages serve different content
/// to obvious bots. Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

// Risk tier thresholds
/// Scores at or above this value are high risk.
pub const HIGH_RISK_THRESHOLD: u32 = 70;
/// Scores at or above this value (and below the high threshold) are medium risk.
pub const MEDIUM_RISK_THRESHOLD: u32 = 40;

/// Keywords whose presence in the URL, title, or body text marks a page as
/// suspicious. Matching is case-insensitive; the signal fires at most once no
/// matter how many keywords match or where.
pub const SUSPICIOUS_KEYWORDS: &[&str] = &[
    "login", "signin", "bank", "account", "verify", "secure", "update", "free", "gift", "prize",
];

/// TLD suffixes disproportionately used by throwaway phishing domains.
/// Compared case-insensitively against the end of the URL string.
pub const UNUSUAL_TLDS: &[&str] = &[
    ".top", ".xyz", ".online", ".site", ".bid", ".win", ".club", ".loan", ".work",
];

/// Known URL-shortener domains. Shorteners hide the real destination, so their
/// presence anywhere in the URL string is scored.
pub const URL_SHORTENERS: &[&str] = &["bit.ly", "tinyurl.com", "goo.gl", "ow.ly"];
