use std::time::Duration;

/// Sink for hash-computation timing, injected by the embedding pool.
///
/// The cache holds an optional sink; when none is injected, timings are
/// simply not reported.
pub trait TelemetrySink: Send + Sync {
    /// Called once per successful hash computation with its elapsed time.
    fn record_hash(&self, elapsed: Duration);
}
