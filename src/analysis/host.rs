//! Host heuristics: IP-literal hosts, unusual TLDs, shortener domains.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

use crate::analysis::AnalysisContext;
use crate::config::{UNUSUAL_TLDS, URL_SHORTENERS};
use crate::models::Signal;

/// Hosts written as bare numeric addresses: digits and dots only.
static IP_LITERAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9.]+$").unwrap_or_else(|e| {
        log::error!("Failed to compile IP-literal pattern: {e}");
        Regex::new("$^").expect("fallback pattern is valid")
    })
});

/// Evaluates the host-level heuristics for a URL.
///
/// DNS resolution is attempted first as a prerequisite for the IP-literal
/// check; a resolution failure is swallowed (logged at debug) and skips only
/// that check — it contributes no penalty and never terminates the pipeline.
/// The TLD and shortener checks run against the raw URL string regardless.
pub async fn evaluate(url: &Url, requested: &str, ctx: &AnalysisContext) -> Vec<Signal> {
    let mut signals = Vec::new();

    if let Some(host) = url.host_str() {
        match ctx.resolver.lookup_ip(host).await {
            Ok(_) => {
                if IP_LITERAL_RE.is_match(host) {
                    signals.push(Signal::IpLiteralHost);
                }
            }
            Err(e) => {
                log::debug!("DNS resolution failed for {host}: {e}");
            }
        }
    }

    let lowered = requested.to_lowercase();
    if UNUSUAL_TLDS.iter().any(|tld| lowered.ends_with(tld)) {
        signals.push(Signal::UnusualTld);
    }
    if URL_SHORTENERS
        .iter()
        .any(|shortener| lowered.contains(shortener))
    {
        signals.push(Signal::ShortenerDomain);
    }

    signals
}
