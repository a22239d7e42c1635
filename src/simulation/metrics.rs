// src/simulation/metrics.rs

//! Summary statistics over recorded waits.
//!
//! Anything that is undefined for an empty sample is an `Option`: `None`
//! means "nobody seen after warm-up", never zero and never NaN.

use serde::Serialize;

/// Conventional reporting thresholds, in days (2, 4 and 6 weeks).
pub const REPORTING_THRESHOLDS: [usize; 3] = [14, 28, 42];

/// Waits sorted ascending, ready for rank-based queries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaitStatistics {
    sorted: Vec<usize>,
}

impl WaitStatistics {
    pub fn new(mut waits: Vec<usize>) -> Self {
        waits.sort_unstable();
        Self { sorted: waits }
    }

    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    pub fn into_sorted(self) -> Vec<usize> {
        self.sorted
    }

    /// Nearest-rank quantile: element `floor((n - 1) * q)`, no interpolation.
    pub fn quantile(&self, q: f64) -> Option<usize> {
        let last = self.sorted.len().checked_sub(1)?;
        let index = ((last as f64) * q).floor().clamp(0.0, last as f64) as usize;
        Some(self.sorted[index])
    }

    pub fn mean(&self) -> Option<f64> {
        if self.sorted.is_empty() {
            return None;
        }
        let total: usize = self.sorted.iter().sum();
        Some(total as f64 / self.sorted.len() as f64)
    }

    pub fn median(&self) -> Option<usize> {
        self.quantile(0.5)
    }

    /// Share of waits at or under `threshold` days.
    pub fn within(&self, threshold: usize) -> Option<f64> {
        if self.sorted.is_empty() {
            return None;
        }
        let count = self.sorted.partition_point(|&w| w <= threshold);
        Some(count as f64 / self.sorted.len() as f64)
    }
}

/// Scalar summary of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub utilisation: f64,
    pub mean_wait: Option<f64>,
    pub median_wait: Option<usize>,
    pub p90_wait: Option<usize>,
    pub within_14: Option<f64>,
    pub within_28: Option<f64>,
    pub within_42: Option<f64>,
    pub n_seen: usize,
}

impl Metrics {
    pub fn derive(waits: &WaitStatistics, used_slots: u64, total_slots: u64) -> Self {
        let utilisation = if total_slots > 0 {
            used_slots as f64 / total_slots as f64
        } else {
            0.0
        };
        let [t14, t28, t42] = REPORTING_THRESHOLDS;

        Self {
            utilisation,
            mean_wait: waits.mean(),
            median_wait: waits.median(),
            p90_wait: waits.quantile(0.9),
            within_14: waits.within(t14),
            within_28: waits.within(t28),
            within_42: waits.within(t42),
            n_seen: waits.len(),
        }
    }
}
