//! Run-scoped statistics
//!
//! Counters live in atomics so the session worker, the writer loop, and the
//! HTTP surface can share one instance without locks on the hot path.
//! Readers always take a [`StatsSnapshot`] - a copy - so they never observe
//! a counter mid-update.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Shared run counters
#[derive(Debug, Default)]
pub struct RunStats {
    /// Records delivered by the vendor session
    fetched: AtomicU64,
    /// Records that parsed into at least one row
    parsed: AtomicU64,
    /// Rows committed by the writer
    imported: AtomicU64,
    /// Records or rows lost (parse errors, missing keys, damaged files)
    failed: AtomicU64,
    /// Batches flushed
    batches: AtomicU64,
    /// Session reopen cycles
    retries: AtomicU64,
    /// Vendor file most recently read
    last_file: Mutex<String>,
    /// Human-readable phase ("chunk 2024-06-01", "monitor 0B12", ...)
    phase: Mutex<String>,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_fetched(&self, n: u64) {
        self.fetched.fetch_add(n, Ordering::Relaxed);
    }

    pub fn add_parsed(&self, n: u64) {
        self.parsed.fetch_add(n, Ordering::Relaxed);
    }

    pub fn add_imported(&self, n: u64) {
        self.imported.fetch_add(n, Ordering::Relaxed);
    }

    pub fn add_failed(&self, n: u64) {
        self.failed.fetch_add(n, Ordering::Relaxed);
    }

    pub fn add_batches(&self, n: u64) {
        self.batches.fetch_add(n, Ordering::Relaxed);
    }

    pub fn add_retries(&self, n: u64) {
        self.retries.fetch_add(n, Ordering::Relaxed);
    }

    pub fn set_last_file(&self, file: &str) {
        if let Ok(mut slot) = self.last_file.lock() {
            slot.clear();
            slot.push_str(file);
        }
    }

    pub fn set_phase(&self, phase: impl Into<String>) {
        if let Ok(mut slot) = self.phase.lock() {
            *slot = phase.into();
        }
    }

    /// Consistent copy of all counters
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            phase: self.phase.lock().map(|s| s.clone()).unwrap_or_default(),
            fetched: self.fetched.load(Ordering::Relaxed),
            parsed: self.parsed.load(Ordering::Relaxed),
            imported: self.imported.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            batches: self.batches.load(Ordering::Relaxed),
            retries: self.retries.load(Ordering::Relaxed),
            last_file: self.last_file.lock().map(|s| s.clone()).unwrap_or_default(),
        }
    }
}

/// Copy-on-read view of the counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub phase: String,
    pub fetched: u64,
    pub parsed: u64,
    pub imported: u64,
    pub failed: u64,
    pub batches: u64,
    pub retries: u64,
    pub last_file: String,
}

/// Progress report emitted after each batch flush and at chunk boundaries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub phase: String,
    pub fetched: u64,
    pub parsed: u64,
    pub imported: u64,
    pub failed: u64,
    pub batches: u64,
    pub retries: u64,
    pub current_file: String,
}

impl ProgressEvent {
    /// Build an event from the current counters
    pub fn from_stats(stats: &RunStats) -> Self {
        let snapshot = stats.snapshot();
        Self {
            phase: snapshot.phase,
            fetched: snapshot.fetched,
            parsed: snapshot.parsed,
            imported: snapshot.imported,
            failed: snapshot.failed,
            batches: snapshot.batches,
            retries: snapshot.retries,
            current_file: snapshot.last_file,
        }
    }
}
