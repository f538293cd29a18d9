//! Cache statistics and metrics tracking

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Statistics for query cache monitoring
#[derive(Debug, Clone, Default)]
pub struct QueryStats {
    /// Current number of entries
    pub size: usize,

    /// Reads served from a fresh cached value
    pub hits: u64,

    /// Reads that required issuing a fetch
    pub misses: u64,

    /// Fetches actually issued to the fetcher
    pub fetches: u64,

    /// Reads that attached to an already in-flight fetch
    pub deduped: u64,

    /// Invalidation signals applied to existing entries
    pub invalidations: u64,

    /// Late completions discarded by issue-order sequencing
    pub discarded: u64,

    /// Entries removed by retention sweeps
    pub swept: u64,
}

impl QueryStats {
    /// Calculate hit rate (hits / total reads)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses + self.deduped;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Total read operations observed
    pub fn total_reads(&self) -> u64 {
        self.hits + self.misses + self.deduped
    }
}

/// Thread-safe metrics collector for cache operations
///
/// Uses atomic counters so recording never takes the storage lock.
#[derive(Debug, Default)]
pub(crate) struct MetricsCollector {
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
    fetches: Arc<AtomicU64>,
    deduped: Arc<AtomicU64>,
    invalidations: Arc<AtomicU64>,
    discarded: Arc<AtomicU64>,
    swept: Arc<AtomicU64>,
}

impl Clone for MetricsCollector {
    fn clone(&self) -> Self {
        Self {
            hits: Arc::clone(&self.hits),
            misses: Arc::clone(&self.misses),
            fetches: Arc::clone(&self.fetches),
            deduped: Arc::clone(&self.deduped),
            invalidations: Arc::clone(&self.invalidations),
            discarded: Arc::clone(&self.discarded),
            swept: Arc::clone(&self.swept),
        }
    }
}

impl MetricsCollector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_fetch(&self) {
        self.fetches.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_dedup(&self) {
        self.deduped.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_invalidation(&self) {
        self.invalidations.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_discard(&self) {
        self.discarded.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_sweep(&self, removed: u64) {
        self.swept.fetch_add(removed, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self, size: usize) -> QueryStats {
        QueryStats {
            size,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            fetches: self.fetches.load(Ordering::Relaxed),
            deduped: self.deduped.load(Ordering::Relaxed),
            invalidations: self.invalidations.load(Ordering::Relaxed),
            discarded: self.discarded.load(Ordering::Relaxed),
            swept: self.swept.load(Ordering::Relaxed),
        }
    }
}
