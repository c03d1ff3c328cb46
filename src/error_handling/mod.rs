//! Error handling and analysis statistics.
//!
//! This module provides:
//! - Typed initialization errors
//! - Batch statistics tracking (signals fired, terminal failures)
//!
//! Expected per-request failures never surface here: the pipeline folds them
//! into scored signals or terminal outcomes (see `crate::models`).

mod stats;
mod types;

// Re-export public API
pub use stats::AnalysisStats;
pub use types::InitializationError;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnalysisOutcome, FailureKind, Signal, TerminalFailure};
    use strum::IntoEnumIterator;

    #[test]
    fn test_stats_initialization() {
        let stats = AnalysisStats::new();
        for signal in Signal::iter() {
            assert_eq!(stats.get_signal_count(signal), 0);
        }
        for kind in FailureKind::iter() {
            assert_eq!(stats.get_failure_count(kind), 0);
        }
        assert_eq!(stats.total_analyzed(), 0);
    }

    #[test]
    fn test_record_scored_outcome() {
        let stats = AnalysisStats::new();
        let outcome =
            AnalysisOutcome::from_signals(vec![Signal::SuspiciousKeyword, Signal::LoginForm]);
        stats.record_outcome(&outcome, None);

        assert_eq!(stats.total_analyzed(), 1);
        assert_eq!(stats.get_signal_count(Signal::SuspiciousKeyword), 1);
        assert_eq!(stats.get_signal_count(Signal::LoginForm), 1);
        assert_eq!(stats.total_signals(), 2);
        assert_eq!(stats.total_failures(), 0);
    }

    #[test]
    fn test_record_terminal_outcome() {
        let stats = AnalysisStats::new();
        let failure = TerminalFailure::ConnectionError;
        let outcome = AnalysisOutcome::terminal(&failure);
        stats.record_outcome(&outcome, Some(failure.kind()));

        assert_eq!(stats.total_analyzed(), 1);
        assert_eq!(stats.get_failure_count(FailureKind::ConnectionError), 1);
        assert_eq!(stats.total_signals(), 0);
    }
}
