//! DNS resolver initialization.

use std::sync::Arc;
use std::time::Duration;

use crate::error_handling::InitializationError;
use hickory_resolver::TokioAsyncResolver;

/// Initializes the DNS resolver used by the host heuristics.
///
/// Creates a resolver with aggressive timeouts: a hostname that does not
/// resolve only gates one heuristic check, so there is no reason to wait on
/// slow or unresponsive DNS servers.
///
/// # Errors
///
/// Returns `InitializationError::DnsResolverError` if resolver construction
/// fails (which the default configuration should never do).
pub fn init_resolver() -> Result<Arc<TokioAsyncResolver>, InitializationError> {
    use hickory_resolver::config::{ResolverConfig, ResolverOpts};

    let mut opts = ResolverOpts::default();
    opts.timeout = Duration::from_secs(crate::config::DNS_TIMEOUT_SECS);
    opts.attempts = 2; // Reduce retry attempts to fail faster
                       // Set ndots to 0 to prevent search domain appending
    opts.ndots = 0;

    Ok(Arc::new(TokioAsyncResolver::tokio(
        ResolverConfig::default(),
        opts,
    )))
}
