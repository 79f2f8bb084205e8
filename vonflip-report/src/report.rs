//! Report Data Structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vonflip_core::{ExperimentSummary, TrialResult};
use vonflip_stats::relative_error;

/// Complete experiment report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// When, where and with which build the experiment ran
    pub meta: ReportMeta,
    /// Effective configuration after layering
    pub config: ReportConfig,
    /// One record per trial, in execution order
    pub trials: Vec<TrialRecord>,
    /// Aggregate over all trials
    pub summary: ExperimentSummary,
    /// How closely the observations match theory
    pub agreement: Agreement,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Report schema version
    pub schema_version: u32,
    /// Version of the tool that produced the report
    pub version: String,
    /// Generation time (UTC)
    pub timestamp: DateTime<Utc>,
    /// Host description
    pub system: SystemInfo,
}

/// System information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Operating system
    pub os: String,
    /// CPU architecture
    pub arch: String,
    /// CPU model name
    pub cpu: String,
    /// Available parallelism
    pub cpu_cores: u32,
    /// Whether cycle counts are real
    pub cycle_counter: bool,
}

/// Configuration captured in the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Tails probability of the biased source
    pub bias: f64,
    /// Number of trials
    pub trial_count: u32,
    /// Unbiased bits per trial
    pub sequence_length: u64,
    /// Generator seed, when the run is reproducible
    pub seed: Option<u64>,
    /// Pair cap per emitted bit, when hardened
    pub max_pairs: Option<u64>,
}

/// One trial, flattened for output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialRecord {
    /// Zero-based trial index
    pub index: usize,
    /// Heads in the sequence
    pub heads: u64,
    /// Heads divided by sequence length
    pub heads_fraction: f64,
    /// Elapsed seconds
    pub elapsed_secs: f64,
    /// Elapsed CPU ticks
    pub cycles: u64,
    /// Pairs drawn
    pub pairs: u64,
    /// Biased flips drawn
    pub flips: u64,
}

impl TrialRecord {
    /// Flatten the `index`-th trial
    pub fn from_trial(index: usize, trial: &TrialResult) -> Self {
        Self {
            index,
            heads: trial.heads,
            heads_fraction: trial.heads_fraction(),
            elapsed_secs: trial.elapsed_secs(),
            cycles: trial.elapsed.cycles,
            pairs: trial.draws.pairs,
            flips: trial.draws.flips,
        }
    }
}

/// Observed-versus-theoretical comparison
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Agreement {
    /// Average heads minus expected heads
    pub heads_offset: f64,
    /// `heads_offset` in units of the per-trial standard deviation
    pub heads_offset_std_devs: f64,
    /// Relative error of observed pairs per bit
    pub pairs_per_bit_error: f64,
    /// Relative error of observed flips per bit
    pub flips_per_bit_error: f64,
}

impl Agreement {
    /// Compare a summary with its embedded expectation
    pub fn from_summary(summary: &ExperimentSummary) -> Self {
        let exp = &summary.expectation;
        let heads_offset = summary.avg_heads - exp.expected_heads;
        let heads_offset_std_devs = if exp.heads_std_dev > 0.0 {
            heads_offset / exp.heads_std_dev
        } else {
            0.0
        };

        // Nothing was drawn for empty sequences, so there is nothing to compare
        let (pairs_per_bit_error, flips_per_bit_error) = if summary.draws.bits == 0 {
            (0.0, 0.0)
        } else {
            (
                relative_error(summary.pairs_per_bit, exp.expected_pairs_per_bit),
                relative_error(summary.flips_per_bit, exp.expected_flips_per_bit),
            )
        };

        Self {
            heads_offset,
            heads_offset_std_devs,
            pairs_per_bit_error,
            flips_per_bit_error,
        }
    }
}

impl Report {
    /// Assemble a report from executed trials and their summary
    pub fn new(
        meta: ReportMeta,
        config: ReportConfig,
        trials: &[TrialResult],
        summary: ExperimentSummary,
    ) -> Self {
        let agreement = Agreement::from_summary(&summary);
        Self {
            meta,
            config,
            trials: trials
                .iter()
                .enumerate()
                .map(|(i, t)| TrialRecord::from_trial(i, t))
                .collect(),
            summary,
            agreement,
        }
    }
}
