//! Batch-run support utilities: progress logging and statistics printing.

use log::info;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use strum::IntoEnumIterator;

use crate::error_handling::AnalysisStats;
use crate::models::{FailureKind, Signal};

/// Logs progress information about URL analysis.
///
/// # Arguments
///
/// * `start_time` - The start time of processing
/// * `completed` - Atomic counter of completed analyses
/// * `total` - Total number of candidates in the batch
pub fn log_progress(start_time: std::time::Instant, completed: &Arc<AtomicUsize>, total: usize) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let done = completed.load(Ordering::SeqCst);
    let rate = if elapsed_secs > 0.0 {
        done as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Analyzed {}/{} URLs in {:.2} seconds (~{:.2} URLs/sec)",
        done, total, elapsed_secs, rate
    );
}

/// Prints per-signal and per-failure counts for a finished batch.
///
/// Only non-zero counters are shown.
pub fn print_signal_statistics(stats: &AnalysisStats) {
    let total_signals = stats.total_signals();
    let total_failures = stats.total_failures();

    if total_signals > 0 {
        info!("Signal counts ({} total):", total_signals);
        for signal in Signal::iter() {
            let count = stats.get_signal_count(signal);
            if count > 0 {
                info!("   {}: {}", signal.as_str(), count);
            }
        }
    }

    if total_failures > 0 {
        info!("Terminal failure counts ({} total):", total_failures);
        for kind in FailureKind::iter() {
            let count = stats.get_failure_count(kind);
            if count > 0 {
                info!("   {}: {}", kind.as_str(), count);
            }
        }
    }
}
