//! Content-level scoring rules.
//!
//! These rules run last, over the signals the earlier stages could not
//! evaluate: they need both the transport observations and the parsed
//! document. Score aggregation itself lives on `AnalysisOutcome`; this module
//! only decides which signals fire.

use url::Url;

use crate::config::SUSPICIOUS_KEYWORDS;
use crate::models::{PageContent, Signal, TransportResult};

/// Minimum title length below which the title-quality signal fires.
const MIN_TITLE_LENGTH: usize = 3;

/// Evaluates the keyword, title, redirect, and login-form rules.
///
/// - Keyword: fires once if any blocklisted keyword appears case-insensitively
///   in the URL string, the title, or the body text — never more than once,
///   regardless of how many keywords match or in how many places.
/// - Title: fires when the title is blank or shorter than 3 characters.
/// - Redirect: fires when the final resolved URL differs from the requested one.
/// - Login form: fires when any form action contains "login" or "signin".
pub fn evaluate(
    requested: &str,
    requested_url: &Url,
    transport: &TransportResult,
    page: &PageContent,
) -> Vec<Signal> {
    let mut signals = Vec::new();

    let url_lower = requested.to_lowercase();
    let title_lower = page.title.to_lowercase();
    let body_lower = page.body_text.to_lowercase();
    if SUSPICIOUS_KEYWORDS.iter().any(|keyword| {
        url_lower.contains(keyword)
            || title_lower.contains(keyword)
            || body_lower.contains(keyword)
    }) {
        signals.push(Signal::SuspiciousKeyword);
    }

    let title = page.title.trim();
    if title.is_empty() || title.len() < MIN_TITLE_LENGTH {
        signals.push(Signal::ShortTitle);
    }

    if transport.final_url != *requested_url {
        signals.push(Signal::Redirected);
    }

    if page.form_actions.iter().any(|action| {
        let action = action.to_lowercase();
        action.contains("login") || action.contains("signin")
    }) {
        signals.push(Signal::LoginForm);
    }

    signals
}
