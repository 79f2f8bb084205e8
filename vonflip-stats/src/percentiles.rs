//! Percentiles over trial samples
//!
//! Every trial counts; slow trials are part of what an experiment reports.

use std::cmp::Ordering;

/// Samples sorted once so several percentiles can be read without re-sorting
#[derive(Debug, Clone, Default)]
pub struct SortedSamples {
    values: Vec<f64>,
}

impl SortedSamples {
    /// Copy and sort `samples`; NaN values compare as equal to their neighbours
    pub fn new(samples: &[f64]) -> Self {
        let mut values = samples.to_vec();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        Self { values }
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when there are no samples
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Percentile `pct` in [0, 100], linearly interpolated between ranks.
    /// Out-of-range requests are clamped; an empty set yields 0.
    pub fn percentile(&self, pct: f64) -> f64 {
        let Some((&first, _)) = self.values.split_first() else {
            return 0.0;
        };
        let last_rank = self.values.len() - 1;
        if last_rank == 0 {
            return first;
        }

        let rank = (pct / 100.0).clamp(0.0, 1.0) * last_rank as f64;
        let below = rank.floor() as usize;
        let above = (below + 1).min(last_rank);
        let weight = rank - below as f64;

        let low = self.values[below];
        low + weight * (self.values[above] - low)
    }
}

/// Compute a single percentile from unsorted samples
///
/// # Examples
///
/// ```
/// # use vonflip_stats::compute_percentile;
/// let samples = vec![1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(compute_percentile(&samples, 50.0), 3.0);
/// ```
pub fn compute_percentile(samples: &[f64], pct: f64) -> f64 {
    SortedSamples::new(samples).percentile(pct)
}
