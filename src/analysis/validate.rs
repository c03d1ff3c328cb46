//! URL syntax validation: the first pipeline stage.

use url::Url;

use crate::config::MAX_URL_LENGTH;
use crate::models::{StageResult, TerminalFailure};

/// Validates that the input is a well-formed absolute URL.
///
/// Accepts any absolute URL with an authority component; scheme policing is
/// left to the transport stage so that reachable-but-unsupported schemes are
/// reported as connection failures rather than syntax errors. Rejects inputs
/// longer than `MAX_URL_LENGTH`.
///
/// On `Terminal`, no network access has been attempted and the outcome is the
/// fixed invalid-URL penalty.
pub fn validate(raw: &str) -> StageResult<Url> {
    if raw.len() > MAX_URL_LENGTH {
        log::debug!(
            "Rejecting URL exceeding maximum length ({} > {})",
            raw.len(),
            MAX_URL_LENGTH
        );
        return StageResult::Terminal(TerminalFailure::InvalidUrl);
    }

    match Url::parse(raw) {
        Ok(url) if url.has_host() => StageResult::Next {
            value: url,
            signals: Vec::new(),
        },
        Ok(_) => {
            log::debug!("Rejecting URL without a host component: {raw}");
            StageResult::Terminal(TerminalFailure::InvalidUrl)
        }
        Err(e) => {
            log::debug!("Rejecting unparseable URL {raw}: {e}");
            StageResult::Terminal(TerminalFailure::InvalidUrl)
        }
    }
}
