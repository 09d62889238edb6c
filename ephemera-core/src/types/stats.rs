//! Cache statistics.

use serde::{Deserialize, Serialize};

/// Snapshot of a cache's contents and sweep history.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Total entries in memory (including expired, unswept ones)
    pub total_entries: usize,
    /// Entries past their TTL that have not been swept yet
    pub expired_entries: usize,
    /// Entries still readable
    pub valid_entries: usize,
    /// Sweeps run so far (background and manual)
    pub sweeps: u64,
    /// Entries removed by sweeps so far
    pub evicted: u64,
}

impl CacheStats {
    /// Fraction of resident entries that are expired, in `[0, 1]`.
    pub fn expired_ratio(&self) -> f64 {
        if self.total_entries == 0 {
            0.0
        } else {
            self.expired_entries as f64 / self.total_entries as f64
        }
    }
}
