#![warn(missing_docs)]
//! # Vonflip
//!
//! Simulator for the Von Neumann extraction method: a biased coin is turned
//! into a fair one by drawing pairs of flips, discarding pairs that agree and
//! keeping the second flip of pairs that disagree.
//!
//! The crate measures how closely the output matches theory:
//! - **Fairness**: the fraction of heads converges to one half for any bias
//! - **Cost**: the number of pairs drawn per bit grows as `1 / (2p(1-p))`
//! - **Timing**: wall-clock time and CPU cycles per trial, summarized over an experiment
//!
//! ## Quick Start
//!
//! ```
//! use vonflip::prelude::*;
//!
//! let source = BiasedSource::new(0.4).unwrap();
//! let mut corrector = BiasCorrector::new(source, RngSampler::seeded(7));
//! let heads = generate_unbiased_sequence(&mut corrector, 1_000).unwrap();
//! assert!(heads <= 1_000);
//! ```
//!
//! ## Experiments
//!
//! ```
//! use vonflip::prelude::*;
//!
//! let source = BiasedSource::new(0.25).unwrap();
//! let mut corrector = BiasCorrector::new(source, RngSampler::seeded(11));
//! let config = ExperimentConfig::new(3, 500).unwrap();
//! let summary = run_experiment(&mut corrector, &config).unwrap();
//! assert!(summary.min_time <= summary.avg_time && summary.avg_time <= summary.max_time);
//! ```

// Re-export core types
pub use vonflip_core::{
    BiasCorrector, BiasedSource, Coin, DEFAULT_BIAS, DEFAULT_SEQUENCE_LENGTH, DEFAULT_TRIAL_COUNT,
    DrawCounters, Elapsed, Error, ExperimentConfig, ExperimentSummary, HAS_CYCLE_COUNTER,
    ReplaySampler, Result, RngSampler, Timer, TrialResult, UniformSampler,
    generate_unbiased_sequence, run_experiment, run_trials, summarize, timed, timed_sequence,
};

// Re-export stats
pub use vonflip_stats::{Expectation, SummaryStatistics, compute_summary, relative_error};

// Re-export report model
pub use vonflip_report::{OutputFormat, Report, generate_json_report};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        BiasCorrector, BiasedSource, Coin, ExperimentConfig, ExperimentSummary, ReplaySampler,
        RngSampler, TrialResult, UniformSampler, generate_unbiased_sequence, run_experiment,
        timed_sequence,
    };
}

/// Run the Vonflip CLI.
///
/// Call this from a binary's `main()`:
/// ```ignore
/// fn main() -> anyhow::Result<()> {
///     vonflip::run()
/// }
/// ```
pub use vonflip_cli::run;
