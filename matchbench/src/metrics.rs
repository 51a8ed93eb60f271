use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

use crate::search::MatchOutcome;

/// Counters shared by every worker of a benchmark run
#[derive(Debug, Default)]
pub struct BenchMetrics {
    // Search metrics
    searches_run: AtomicU64,
    comparisons: AtomicU64,
    symbols_scanned: AtomicU64,
    matches_found: AtomicU64,

    // Sample loading metrics
    samples_loaded: AtomicU64,
    bytes_loaded: AtomicU64,
    mmap_loads: AtomicU64,
}

impl BenchMetrics {
    /// Creates a new BenchMetrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one search over a text of `text_len` symbols
    pub fn record_search(&self, outcome: &MatchOutcome, text_len: usize) {
        self.searches_run.fetch_add(1, Ordering::Relaxed);
        self.comparisons
            .fetch_add(outcome.comparisons, Ordering::Relaxed);
        self.symbols_scanned
            .fetch_add(text_len as u64, Ordering::Relaxed);
        if outcome.is_found() {
            self.matches_found.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Records a sample read from disk
    pub fn record_sample_load(&self, bytes: u64, mapped: bool) {
        self.samples_loaded.fetch_add(1, Ordering::Relaxed);
        let total = self.bytes_loaded.fetch_add(bytes, Ordering::Relaxed) + bytes;
        if mapped {
            self.mmap_loads.fetch_add(1, Ordering::Relaxed);
        }
        debug!("Sample loaded: {} bytes, total: {} bytes", bytes, total);
    }

    /// Gets a snapshot of the counters
    pub fn get_stats(&self) -> BenchStats {
        BenchStats {
            searches_run: self.searches_run.load(Ordering::Relaxed),
            comparisons: self.comparisons.load(Ordering::Relaxed),
            symbols_scanned: self.symbols_scanned.load(Ordering::Relaxed),
            matches_found: self.matches_found.load(Ordering::Relaxed),
            samples_loaded: self.samples_loaded.load(Ordering::Relaxed),
            bytes_loaded: self.bytes_loaded.load(Ordering::Relaxed),
            mmap_loads: self.mmap_loads.load(Ordering::Relaxed),
        }
    }

    /// Logs the counters
    pub fn log_stats(&self) {
        let stats = self.get_stats();
        info!(
            "Benchmark stats:\n\
             Searches run: {}\n\
             Comparisons: {}\n\
             Symbols scanned: {}\n\
             Searches with a match: {}\n\
             Samples loaded (mapped): {} ({})\n\
             Bytes loaded: {}",
            stats.searches_run,
            stats.comparisons,
            stats.symbols_scanned,
            stats.matches_found,
            stats.samples_loaded,
            stats.mmap_loads,
            stats.bytes_loaded
        );
    }
}

/// Snapshot of `BenchMetrics`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchStats {
    pub searches_run: u64,
    pub comparisons: u64,
    pub symbols_scanned: u64,
    pub matches_found: u64,
    pub samples_loaded: u64,
    pub bytes_loaded: u64,
    pub mmap_loads: u64,
}
