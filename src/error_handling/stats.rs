//! Analysis statistics tracking.
//!
//! Thread-safe counters for fired signals and terminal failures across a
//! batch run. Counters are atomic and additive only, so tasks share the
//! tracker through `Arc` without any further coordination.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use crate::models::{AnalysisOutcome, FailureKind, Signal};

/// Thread-safe statistics tracker for a batch of analyses.
///
/// Every signal and failure kind is initialized to zero on creation, so
/// increments never insert and the maps stay read-only after `new()`.
pub struct AnalysisStats {
    analyzed: AtomicUsize,
    signals: HashMap<Signal, AtomicUsize>,
    failures: HashMap<FailureKind, AtomicUsize>,
}

impl AnalysisStats {
    /// Creates a tracker with all counters at zero.
    pub fn new() -> Self {
        let mut signals = HashMap::new();
        for signal in Signal::iter() {
            signals.insert(signal, AtomicUsize::new(0));
        }

        let mut failures = HashMap::new();
        for kind in FailureKind::iter() {
            failures.insert(kind, AtomicUsize::new(0));
        }

        AnalysisStats {
            analyzed: AtomicUsize::new(0),
            signals,
            failures,
        }
    }

    /// Records one completed analysis: its fired signals, or its terminal
    /// failure kind.
    pub fn record_outcome(&self, outcome: &AnalysisOutcome, failure: Option<FailureKind>) {
        self.analyzed.fetch_add(1, Ordering::Relaxed);
        for signal in &outcome.signals {
            self.increment_signal(*signal);
        }
        if let Some(kind) = failure {
            self.increment_failure(kind);
        }
    }

    /// Increment a signal counter.
    pub fn increment_signal(&self, signal: Signal) {
        if let Some(counter) = self.signals.get(&signal) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Signal counter for {:?} missing from stats map; \
                 this indicates a bug in AnalysisStats initialization",
                signal
            );
        }
    }

    /// Increment a terminal-failure counter.
    pub fn increment_failure(&self, kind: FailureKind) {
        if let Some(counter) = self.failures.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Failure counter for {:?} missing from stats map; \
                 this indicates a bug in AnalysisStats initialization",
                kind
            );
        }
    }

    /// Total analyses recorded.
    pub fn total_analyzed(&self) -> usize {
        self.analyzed.load(Ordering::SeqCst)
    }

    /// Count for one signal.
    pub fn get_signal_count(&self, signal: Signal) -> usize {
        self.signals
            .get(&signal)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Count for one terminal-failure kind.
    pub fn get_failure_count(&self, kind: FailureKind) -> usize {
        self.failures
            .get(&kind)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Sum of all signal counters.
    pub fn total_signals(&self) -> usize {
        self.signals
            .values()
            .map(|c| c.load(Ordering::SeqCst))
            .sum()
    }

    /// Sum of all terminal-failure counters.
    pub fn total_failures(&self) -> usize {
        self.failures
            .values()
            .map(|c| c.load(Ordering::SeqCst))
            .sum()
    }
}

impl Default for AnalysisStats {
    fn default() -> Self {
        Self::new()
    }
}
