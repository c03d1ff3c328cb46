//! Core data model for the analysis pipeline.
//!
//! Everything here is request-local and immutable once produced: a pipeline
//! stage builds its value exactly once, later stages only read it.

use reqwest::StatusCode;
use serde::Serialize;
use strum_macros::EnumIter as EnumIterMacro;
use url::Url;

use crate::config::{HIGH_RISK_THRESHOLD, MEDIUM_RISK_THRESHOLD};

/// A scored heuristic signal.
///
/// Each variant is a named boolean condition with a fixed weight. The full set
/// of variants plus `weight()` is the static rule table: it is compiled into
/// the binary and never mutated. A stage may emit each signal at most once per
/// request, so no rule can double-count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro, Serialize)]
pub enum Signal {
    /// HTTPS was requested but the TLS handshake or connection failed.
    TlsHandshakeFailure,
    /// The captured certificate chain was empty.
    EmptyCertChain,
    /// The leading certificate could not be parsed as X.509.
    MalformedCertificate,
    /// The leading certificate is expired or not yet valid.
    CertificateOutsideValidity,
    /// The URL asked for https but the effective connection was plain http.
    SchemeDowngrade,
    /// The HTTP status code was present and not 200 OK.
    NonOkStatus,
    /// A form posts to an action containing "login" or "signin".
    LoginForm,
    /// A suspicious keyword appeared in the URL, title, or body text.
    SuspiciousKeyword,
    /// The host component is a bare numeric address instead of a domain name.
    IpLiteralHost,
    /// The page title is missing or shorter than 3 characters.
    ShortTitle,
    /// The final resolved URL differs from the requested URL.
    Redirected,
    /// The URL ends with a TLD from the unusual-TLD blocklist.
    UnusualTld,
    /// The URL contains a known URL-shortener domain.
    ShortenerDomain,
}

impl Signal {
    /// Fixed weight this signal contributes to the final score.
    pub fn weight(self) -> u32 {
        match self {
            Signal::TlsHandshakeFailure => 40,
            Signal::EmptyCertChain => 40,
            Signal::MalformedCertificate => 40,
            Signal::CertificateOutsideValidity => 30,
            Signal::SchemeDowngrade => 25,
            Signal::NonOkStatus => 20,
            Signal::LoginForm => 20,
            Signal::SuspiciousKeyword => 15,
            Signal::IpLiteralHost => 15,
            Signal::ShortTitle => 10,
            Signal::Redirected => 10,
            Signal::UnusualTld => 10,
            Signal::ShortenerDomain => 10,
        }
    }

    /// Short human-readable name, used in statistics output.
    pub fn as_str(self) -> &'static str {
        match self {
            Signal::TlsHandshakeFailure => "TLS handshake failure",
            Signal::EmptyCertChain => "Empty certificate chain",
            Signal::MalformedCertificate => "Malformed certificate",
            Signal::CertificateOutsideValidity => "Certificate outside validity window",
            Signal::SchemeDowngrade => "Scheme downgrade (https requested, http served)",
            Signal::NonOkStatus => "Non-OK HTTP status",
            Signal::LoginForm => "Login/signin form",
            Signal::SuspiciousKeyword => "Suspicious keyword",
            Signal::IpLiteralHost => "IP-literal host",
            Signal::ShortTitle => "Missing or short title",
            Signal::Redirected => "Redirected to a different URL",
            Signal::UnusualTld => "Unusual TLD",
            Signal::ShortenerDomain => "Known shortener domain",
        }
    }
}

/// A failure that ends the pipeline early with a fixed score and label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalFailure {
    /// The input does not parse as an absolute URL with a host.
    InvalidUrl,
    /// No HTTP-capable connection could be established.
    ConnectionError,
    /// The document could not be fetched or parsed.
    ContentFetchError,
    /// Any otherwise-uncaught error during analysis; carries the error text.
    Internal(String),
}

impl TerminalFailure {
    /// Fixed score assigned to this failure.
    pub fn score(&self) -> u32 {
        match self {
            TerminalFailure::InvalidUrl => 30,
            TerminalFailure::ConnectionError => 100,
            TerminalFailure::ContentFetchError => 100,
            TerminalFailure::Internal(_) => 100,
        }
    }

    /// Display label shown to the caller.
    pub fn label(&self) -> String {
        match self {
            TerminalFailure::InvalidUrl => "Invalid URL Format".to_string(),
            TerminalFailure::ConnectionError => "Connection Error".to_string(),
            TerminalFailure::ContentFetchError => "Error parsing page".to_string(),
            TerminalFailure::Internal(detail) => format!("Error checking link: {detail}"),
        }
    }

    /// Stats key for this failure (drops any payload).
    pub fn kind(&self) -> FailureKind {
        match self {
            TerminalFailure::InvalidUrl => FailureKind::InvalidUrl,
            TerminalFailure::ConnectionError => FailureKind::ConnectionError,
            TerminalFailure::ContentFetchError => FailureKind::ContentFetchError,
            TerminalFailure::Internal(_) => FailureKind::Internal,
        }
    }
}

/// Fieldless terminal-failure discriminant used as a statistics key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum FailureKind {
    /// Input rejected by the syntax validator.
    InvalidUrl,
    /// No usable connection could be established.
    ConnectionError,
    /// Document fetch or parse failed.
    ContentFetchError,
    /// Catch-all for unexpected errors.
    Internal,
}

impl FailureKind {
    /// Short human-readable name, used in statistics output.
    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::InvalidUrl => "Invalid URL format",
            FailureKind::ConnectionError => "Connection error",
            FailureKind::ContentFetchError => "Content fetch/parse error",
            FailureKind::Internal => "Internal error",
        }
    }
}

/// Outcome of a single pipeline stage: either signals to merge forward, or a
/// terminal failure that fixes the score and stops evaluation.
///
/// Expected failures (bad certificates, handshake errors) travel through this
/// type rather than through `Err`, so `?` stays reserved for genuinely
/// unexpected conditions caught at the pipeline boundary.
#[derive(Debug)]
pub enum StageResult<T> {
    /// Stage succeeded; carry its value and any signals it raised.
    Next {
        /// Value passed to the next stage.
        value: T,
        /// Signals the stage raised, merged into the request's running set.
        signals: Vec<Signal>,
    },
    /// Stage failed terminally; no further stage runs.
    Terminal(TerminalFailure),
}

/// What the transport probe observed.
///
/// `status` is `None` when no HTTP round trip completed (only possible after a
/// TLS capture failure, which is already scored). `cert_chain` is present only
/// when an HTTPS capture succeeded; the chain may still be empty or malformed.
#[derive(Debug, Clone)]
pub struct TransportResult {
    /// Scheme of the requested URL.
    pub scheme: String,
    /// HTTP status code, if a round trip completed.
    pub status: Option<StatusCode>,
    /// Final URL after redirects; equals the requested URL when no round trip
    /// completed.
    pub final_url: Url,
    /// Raw DER certificate chain captured during the TLS handshake.
    pub cert_chain: Option<Vec<Vec<u8>>>,
}

/// Temporal and structural verdict on a captured certificate chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertificateVerdict {
    /// Chain was captured but contained no certificates.
    Absent,
    /// Leading certificate is not X.509-shaped.
    NotX509,
    /// Leading certificate is expired or not yet valid.
    OutsideValidity,
    /// Leading certificate parsed and is within its validity window.
    Valid,
}

/// Parsed page content exposed to the scorer. Produced once, read-only.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    /// Document title, trimmed; may be empty.
    pub title: String,
    /// Visible body text with normalized whitespace.
    pub body_text: String,
    /// Every `<form>` action attribute value, in document order.
    pub form_actions: Vec<String>,
}

/// Risk tier derived from the final score via fixed thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    /// Score below 40.
    Low,
    /// Score in `40..70`.
    Medium,
    /// Score 70 or above.
    High,
}

impl RiskTier {
    /// Maps a score to its tier: `>= 70` high, `>= 40` medium, else low.
    pub fn from_score(score: u32) -> Self {
        if score >= HIGH_RISK_THRESHOLD {
            RiskTier::High
        } else if score >= MEDIUM_RISK_THRESHOLD {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }

    /// Display name for the tier.
    pub fn as_str(self) -> &'static str {
        match self {
            RiskTier::Low => "low risk",
            RiskTier::Medium => "medium risk",
            RiskTier::High => "high risk",
        }
    }
}

/// The single result produced for every analysis request.
///
/// Exactly one outcome is returned per request, whether the pipeline ran to
/// completion or stopped at a terminal failure.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutcome {
    /// Accumulated score (terminal failures use their fixed score).
    pub score: u32,
    /// Human-readable label or message.
    pub label: String,
    /// Risk tier derived from the score.
    pub tier: RiskTier,
    /// True when evaluation stopped early due to a hard failure.
    pub terminal: bool,
    /// The signals that fired; empty for terminal outcomes.
    pub signals: Vec<Signal>,
    /// Failure discriminant for terminal outcomes (statistics key).
    #[serde(skip)]
    pub failure: Option<FailureKind>,
}

impl AnalysisOutcome {
    /// Builds the outcome for a completed (non-terminal) evaluation.
    ///
    /// The score is the plain sum of the fired signal weights, so it is
    /// independent of evaluation order.
    pub fn from_signals(signals: Vec<Signal>) -> Self {
        let score: u32 = signals.iter().map(|s| s.weight()).sum();
        AnalysisOutcome {
            score,
            label: format!("Phishing Risk: {score}%"),
            tier: RiskTier::from_score(score),
            terminal: false,
            signals,
            failure: None,
        }
    }

    /// Builds the outcome for a terminal failure.
    pub fn terminal(failure: &TerminalFailure) -> Self {
        let score = failure.score();
        AnalysisOutcome {
            score,
            label: failure.label(),
            tier: RiskTier::from_score(score),
            terminal: true,
            signals: Vec::new(),
            failure: Some(failure.kind()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_tier_boundaries() {
        assert_eq!(RiskTier::from_score(70), RiskTier::High);
        assert_eq!(RiskTier::from_score(69), RiskTier::Medium);
        assert_eq!(RiskTier::from_score(40), RiskTier::Medium);
        assert_eq!(RiskTier::from_score(39), RiskTier::Low);
        assert_eq!(RiskTier::from_score(0), RiskTier::Low);
        assert_eq!(RiskTier::from_score(200), RiskTier::High);
    }

    #[test]
    fn test_score_is_order_independent() {
        let forward = vec![
            Signal::SuspiciousKeyword,
            Signal::LoginForm,
            Signal::ShortenerDomain,
        ];
        let mut reversed = forward.clone();
        reversed.reverse();
        assert_eq!(
            AnalysisOutcome::from_signals(forward).score,
            AnalysisOutcome::from_signals(reversed).score
        );
    }

    #[test]
    fn test_clean_outcome_label() {
        let outcome = AnalysisOutcome::from_signals(Vec::new());
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.label, "Phishing Risk: 0%");
        assert_eq!(outcome.tier, RiskTier::Low);
        assert!(!outcome.terminal);
    }

    #[test]
    fn test_terminal_outcome_fixed_scores() {
        let invalid = AnalysisOutcome::terminal(&TerminalFailure::InvalidUrl);
        assert_eq!(invalid.score, 30);
        assert_eq!(invalid.label, "Invalid URL Format");
        assert_eq!(invalid.tier, RiskTier::Low);
        assert!(invalid.terminal);

        let conn = AnalysisOutcome::terminal(&TerminalFailure::ConnectionError);
        assert_eq!(conn.score, 100);
        assert_eq!(conn.label, "Connection Error");
        assert_eq!(conn.tier, RiskTier::High);

        let parse = AnalysisOutcome::terminal(&TerminalFailure::ContentFetchError);
        assert_eq!(parse.label, "Error parsing page");
        assert_eq!(parse.score, 100);
    }

    #[test]
    fn test_internal_failure_carries_detail() {
        let failure = TerminalFailure::Internal("resolver exploded".to_string());
        let outcome = AnalysisOutcome::terminal(&failure);
        assert_eq!(outcome.score, 100);
        assert!(outcome.label.contains("resolver exploded"));
        assert!(outcome.label.starts_with("Error checking link:"));
    }

    #[test]
    fn test_outcome_serializes_for_json_output() {
        let outcome = AnalysisOutcome::from_signals(vec![Signal::ShortenerDomain]);
        let json = serde_json::to_value(&outcome).expect("outcome should serialize");
        assert_eq!(json["score"], 10);
        assert_eq!(json["tier"], "low");
        assert_eq!(json["terminal"], false);
    }
}
