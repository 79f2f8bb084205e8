#![warn(missing_docs)]
//! Vonflip Statistical Engine
//!
//! Provides the statistics behind experiment reports:
//! - Summary statistics (mean, median, std dev, extremes, percentiles)
//! - Cycle counter statistics collected alongside wall-clock timings
//! - Theoretical expectations of the Von Neumann extraction process

mod percentiles;
mod summary;
mod theory;

pub use percentiles::{SortedSamples, compute_percentile};
pub use summary::{CyclesStatistics, SummaryStatistics, compute_cycles_stats, compute_summary};
pub use theory::{Expectation, relative_error};

/// Probability of heads for an ideal unbiased coin
pub const FAIR_PROBABILITY: f64 = 0.5;

/// Variance of a single unbiased bit (p * (1 - p) with p = 0.5)
pub const FAIR_BIT_VARIANCE: f64 = 0.25;
