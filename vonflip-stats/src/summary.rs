//! Summary Statistics
//!
//! Computes summary statistics over per-trial samples (elapsed seconds,
//! head counts, draws per bit). Every statistic is computed from ALL
//! samples: the experiment average must equal the plain arithmetic mean
//! and stay within `[min, max]`.

use crate::percentiles::SortedSamples;
use serde::{Deserialize, Serialize};

/// Summary statistics over a set of samples
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    /// Arithmetic mean
    pub mean: f64,
    /// Median (50th percentile)
    pub median: f64,
    /// Sample standard deviation (n - 1 denominator)
    pub std_dev: f64,
    /// Smallest sample
    pub min: f64,
    /// Largest sample
    pub max: f64,
    /// 90th percentile
    pub p90: f64,
    /// 99th percentile
    pub p99: f64,
    /// Number of samples summarized
    pub sample_count: usize,
}

/// CPU cycle statistics (computed alongside time stats)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CyclesStatistics {
    /// Mean cycles per trial
    pub mean_cycles: f64,
    /// Minimum cycles observed
    pub min_cycles: u64,
    /// Maximum cycles observed
    pub max_cycles: u64,
    /// Cycles per nanosecond (approximates CPU frequency in GHz)
    pub cycles_per_ns: f64,
}

/// Compute summary statistics over all samples
pub fn compute_summary(samples: &[f64]) -> SummaryStatistics {
    if samples.is_empty() {
        return SummaryStatistics::default();
    }

    let n = samples.len();
    let mean = samples.iter().sum::<f64>() / n as f64;

    let std_dev = if n < 2 {
        0.0
    } else {
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        variance.sqrt()
    };

    let sorted = SortedSamples::new(samples);
    let min = sorted.percentile(0.0);
    let max = sorted.percentile(100.0);

    SummaryStatistics {
        // Rounding in the sum can push the mean a hair outside the extremes
        mean: mean.max(min).min(max),
        median: sorted.percentile(50.0),
        std_dev,
        min,
        max,
        p90: sorted.percentile(90.0),
        p99: sorted.percentile(99.0),
        sample_count: n,
    }
}

impl SummaryStatistics {
    /// Coefficient of variation (relative stddev, in percent)
    pub fn coefficient_of_variation(&self) -> f64 {
        if self.mean == 0.0 {
            0.0
        } else {
            (self.std_dev / self.mean) * 100.0
        }
    }

    /// Difference between the largest and smallest sample
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

/// Compute CPU cycle statistics from raw per-trial cycle counts
///
/// Takes parallel arrays of cycles and nanos to compute the cycles_per_ns ratio.
pub fn compute_cycles_stats(cycles: &[u64], nanos: &[f64]) -> CyclesStatistics {
    if cycles.is_empty() {
        return CyclesStatistics::default();
    }

    let total_cycles: f64 = cycles.iter().map(|&c| c as f64).sum();
    let mean_cycles = total_cycles / cycles.len() as f64;

    let min_cycles = cycles.iter().copied().min().unwrap_or(0);
    let max_cycles = cycles.iter().copied().max().unwrap_or(0);

    let total_nanos: f64 = nanos.iter().sum();
    let cycles_per_ns = if total_nanos > 0.0 {
        total_cycles / total_nanos
    } else {
        0.0
    };

    CyclesStatistics {
        mean_cycles,
        min_cycles,
        max_cycles,
        cycles_per_ns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_summary() {
        let samples = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let summary = compute_summary(&samples);

        assert!((summary.mean - 3.0).abs() < 0.01);
        assert!((summary.median - 3.0).abs() < 0.01);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 5.0);
        assert_eq!(summary.sample_count, 5);
        // sqrt(2.5)
        assert!((summary.std_dev - 1.5811).abs() < 1e-3);
    }

    #[test]
    fn test_mean_keeps_extreme_samples() {
        // A slow trial must move the average, nothing is trimmed
        let samples = vec![1.0, 1.0, 1.0, 1.0, 1.0, 100.0];
        let summary = compute_summary(&samples);

        assert!((summary.mean - 17.5).abs() < 1e-9);
        assert_eq!(summary.max, 100.0);
    }

    #[test]
    fn test_mean_between_extremes() {
        let samples = vec![0.1, 0.1, 0.1];
        let summary = compute_summary(&samples);

        assert!(summary.min <= summary.mean && summary.mean <= summary.max);
        assert!((summary.coefficient_of_variation() - 0.0).abs() < 1e-9);
        assert!((summary.range() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_single_sample() {
        let summary = compute_summary(&[7.0]);

        assert_eq!(summary.mean, 7.0);
        assert_eq!(summary.std_dev, 0.0);
        assert_eq!(summary.min, 7.0);
        assert_eq!(summary.max, 7.0);
    }

    #[test]
    fn test_empty_samples() {
        let samples: Vec<f64> = Vec::new();
        let summary = compute_summary(&samples);

        assert_eq!(summary.sample_count, 0);
        assert!((summary.mean - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cycles_stats() {
        let cycles = vec![3000u64, 3100, 2900, 3050, 2950];
        let nanos = vec![1000.0, 1033.0, 967.0, 1017.0, 983.0];
        let stats = compute_cycles_stats(&cycles, &nanos);

        assert!((stats.mean_cycles - 3000.0).abs() < 50.0);
        assert_eq!(stats.min_cycles, 2900);
        assert_eq!(stats.max_cycles, 3100);
        // ~3 cycles per ns
        assert!((stats.cycles_per_ns - 3.0).abs() < 0.5);
    }

    #[test]
    fn test_cycles_stats_empty() {
        let stats = compute_cycles_stats(&[], &[]);

        assert!((stats.mean_cycles - 0.0).abs() < f64::EPSILON);
        assert_eq!(stats.min_cycles, 0);
        assert_eq!(stats.max_cycles, 0);
    }
}
