//! HTTP client initialization.
//!
//! Two clients back the pipeline: a probe client for the transport stage and
//! a content client for the document fetch. They differ only in timeout
//! budget; both follow redirects so the final resolved URL can be compared
//! against the requested one.

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use reqwest::ClientBuilder;

/// Initializes the HTTP client used by the transport probe.
///
/// Configured with:
/// - User-Agent header from the configuration
/// - The probe connection timeout (default 5 s)
/// - Redirect following enabled (reqwest's default 10-hop limit)
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_probe_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .connect_timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}

/// Initializes the HTTP client used by the content fetcher.
///
/// Document downloads can legitimately take longer than the probe, so this
/// client carries its own timeout (default 10 s) instead of the probe's.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_content_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(config.content_timeout_seconds))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}
