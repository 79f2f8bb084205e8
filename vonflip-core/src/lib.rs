#![warn(missing_docs)]
//! Vonflip Core - Extractor and Experiment Runner
//!
//! This crate provides the simulation itself:
//! - `UniformSampler` capability with `rand`-backed and scripted implementations
//! - `BiasedSource` and the Von Neumann `BiasCorrector`
//! - Unbiased sequence generation with draw accounting
//! - Timed trials and the repeated-trial experiment summary
//! - Scoped timing (wall clock plus CPU ticks where available)

mod corrector;
mod error;
mod experiment;
mod measure;
mod sequence;
mod source;

pub use corrector::{BiasCorrector, DrawCounters};
pub use error::{Error, Result};
pub use experiment::{
    ExperimentConfig, ExperimentSummary, run_experiment, run_trials, summarize,
};
/// Whether this platform provides hardware cycle counters (x86_64 RDTSCP or AArch64 CNTVCT_EL0).
/// When `false`, cycle counts are reported as 0 and only wall-clock time is available.
pub use measure::HAS_CYCLE_COUNTER;
pub use measure::{Elapsed, Timer, timed};
pub use sequence::{TrialResult, generate_unbiased_sequence, timed_sequence};
pub use source::{BiasedSource, Coin, ReplaySampler, RngSampler, UniformSampler};

/// Tails probability used when none is configured
pub const DEFAULT_BIAS: f64 = 0.4;

/// Trials per experiment when none is configured
pub const DEFAULT_TRIAL_COUNT: u32 = 10;

/// Unbiased bits per trial when none is configured
pub const DEFAULT_SEQUENCE_LENGTH: u64 = 1_000_000;
