//! Run-wide search volume statistics.
//!
//! Percentiles are taken by simple rank over the sorted list of positive
//! volumes: `sorted[min(floor(p * n), n - 1)]`. An empty list falls back to
//! fixed values so small or volume-less runs still get sane thresholds.

use serde::Serialize;

pub const FALLBACK_P75: u64 = 300;
pub const FALLBACK_P80: u64 = 500;
pub const FALLBACK_P95: u64 = 1000;

/// Floor for promoting an undersized group on combined volume.
pub const MIN_COMBINED_VOLUME: u64 = 800;
/// Floor for promoting a lone keyword on its own volume.
pub const MIN_SINGLE_VOLUME: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VolumeStats {
    pub p75: u64,
    pub p80: u64,
    pub p95: u64,
}

impl VolumeStats {
    /// Compute percentiles over the positive entries of `volumes`.
    pub fn from_volumes<I: IntoIterator<Item = u64>>(volumes: I) -> Self {
        let mut sorted: Vec<u64> = volumes.into_iter().filter(|v| *v > 0).collect();
        if sorted.is_empty() {
            return Self::default();
        }
        sorted.sort_unstable();
        Self {
            p75: percentile(&sorted, 0.75),
            p80: percentile(&sorted, 0.80),
            p95: percentile(&sorted, 0.95),
        }
    }

    pub fn combined_volume_threshold(&self) -> u64 {
        self.p75.max(MIN_COMBINED_VOLUME)
    }

    pub fn single_volume_threshold(&self) -> u64 {
        self.p80.max(MIN_SINGLE_VOLUME)
    }
}

impl Default for VolumeStats {
    fn default() -> Self {
        Self {
            p75: FALLBACK_P75,
            p80: FALLBACK_P80,
            p95: FALLBACK_P95,
        }
    }
}

/// Rank percentile of an ascending, non-empty slice.
pub fn percentile(sorted: &[u64], p: f64) -> u64 {
    let idx = ((p * sorted.len() as f64).floor() as usize).min(sorted.len() - 1);
    sorted[idx]
}
