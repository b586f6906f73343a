use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Tracks the cost of a search run.
///
/// Cloning shares the underlying counters, so the matcher and its caller can
/// each hold a handle.
#[derive(Debug, Clone)]
pub struct SearchMetrics {
    // Matcher counters
    windows_scanned: Arc<AtomicU64>,
    hash_hits: Arc<AtomicU64>,
    collisions: Arc<AtomicU64>,
    matches_verified: Arc<AtomicU64>,
    search_nanos: Arc<AtomicU64>,

    // Source counters
    bytes_loaded: Arc<AtomicU64>,
    mmap_loads: Arc<AtomicU64>,
}

impl SearchMetrics {
    /// Creates a new SearchMetrics instance
    pub fn new() -> Self {
        Self {
            windows_scanned: Arc::new(AtomicU64::new(0)),
            hash_hits: Arc::new(AtomicU64::new(0)),
            collisions: Arc::new(AtomicU64::new(0)),
            matches_verified: Arc::new(AtomicU64::new(0)),
            search_nanos: Arc::new(AtomicU64::new(0)),
            bytes_loaded: Arc::new(AtomicU64::new(0)),
            mmap_loads: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Records the outcome of one matcher pass
    pub fn record_scan(&self, windows: u64, hash_hits: u64, verified: u64) {
        self.windows_scanned.fetch_add(windows, Ordering::Relaxed);
        self.hash_hits.fetch_add(hash_hits, Ordering::Relaxed);
        self.matches_verified.fetch_add(verified, Ordering::Relaxed);
        self.collisions
            .fetch_add(hash_hits - verified, Ordering::Relaxed);
    }

    /// Adds wall-clock time spent inside the matcher
    pub fn record_search_time(&self, elapsed: Duration) {
        let nanos = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        self.search_nanos.fetch_add(nanos, Ordering::Relaxed);
    }

    /// Records a loaded input source
    pub fn record_load(&self, bytes: u64, mapped: bool) {
        self.bytes_loaded.fetch_add(bytes, Ordering::Relaxed);
        if mapped {
            self.mmap_loads.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn collisions(&self) -> u64 {
        self.collisions.load(Ordering::Relaxed)
    }

    pub fn search_time(&self) -> Duration {
        Duration::from_nanos(self.search_nanos.load(Ordering::Relaxed))
    }

    /// Gets a snapshot of all counters
    pub fn get_stats(&self) -> SearchStats {
        SearchStats {
            windows_scanned: self.windows_scanned.load(Ordering::Relaxed),
            hash_hits: self.hash_hits.load(Ordering::Relaxed),
            collisions: self.collisions.load(Ordering::Relaxed),
            matches_verified: self.matches_verified.load(Ordering::Relaxed),
            search_time: self.search_time(),
            bytes_loaded: self.bytes_loaded.load(Ordering::Relaxed),
            mmap_loads: self.mmap_loads.load(Ordering::Relaxed),
        }
    }

    /// Logs current statistics
    pub fn log_stats(&self) {
        let stats = self.get_stats();
        debug!(
            "Search stats:\n\
             Bytes loaded: {} (memory mapped loads: {})\n\
             Windows scanned: {}\n\
             Hash hits/collisions: {}/{}\n\
             Verified matches: {}\n\
             Search time: {}",
            stats.bytes_loaded,
            stats.mmap_loads,
            stats.windows_scanned,
            stats.hash_hits,
            stats.collisions,
            stats.matches_verified,
            humantime::format_duration(stats.search_time)
        );
    }
}

impl Default for SearchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time copy of [`SearchMetrics`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    pub windows_scanned: u64,
    pub hash_hits: u64,
    pub collisions: u64,
    pub matches_verified: u64,
    pub search_time: Duration,
    pub bytes_loaded: u64,
    pub mmap_loads: u64,
}
