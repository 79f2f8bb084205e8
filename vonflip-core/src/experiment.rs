//! Experiment Runner
//!
//! Repeats timed sequence generation and aggregates the trials.
//!
//! ```text
//! ExperimentConfig ──validate──▶ run_trials ──▶ Vec<TrialResult> ──▶ summarize
//!                                    │                                   │
//!                               on_trial hook                    ExperimentSummary
//! ```
//!
//! Trials run sequentially in a fixed order. Statistics are computed only
//! after every trial has completed.

use crate::corrector::{BiasCorrector, DrawCounters};
use crate::error::{Error, Result};
use crate::sequence::{TrialResult, timed_sequence};
use crate::source::{BiasedSource, UniformSampler};
use crate::{DEFAULT_SEQUENCE_LENGTH, DEFAULT_TRIAL_COUNT};
use serde::{Deserialize, Serialize};
use vonflip_stats::{
    CyclesStatistics, Expectation, SummaryStatistics, compute_cycles_stats, compute_summary,
};

/// Shape of an experiment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Number of independent trials (must be at least 1)
    pub trial_count: u32,
    /// Unbiased bits generated per trial
    pub sequence_length: u64,
}

impl ExperimentConfig {
    /// Build a validated configuration
    pub fn new(trial_count: u32, sequence_length: u64) -> Result<Self> {
        let config = Self {
            trial_count,
            sequence_length,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot produce a summary
    pub fn validate(&self) -> Result<()> {
        if self.trial_count == 0 {
            return Err(Error::InvalidTrialCount);
        }
        Ok(())
    }
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            trial_count: DEFAULT_TRIAL_COUNT,
            sequence_length: DEFAULT_SEQUENCE_LENGTH,
        }
    }
}

/// Aggregate over all trials of one experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentSummary {
    /// Number of trials summarized
    pub trial_count: u32,
    /// Unbiased bits per trial
    pub sequence_length: u64,
    /// Tails probability of the biased source
    pub bias: f64,
    /// Sum of head counts divided by the trial count
    pub avg_heads: f64,
    /// Mean elapsed seconds per trial
    pub avg_time: f64,
    /// Fastest trial in seconds
    pub min_time: f64,
    /// Slowest trial in seconds
    pub max_time: f64,
    /// Fraction of heads over every emitted bit (0.0 when nothing was emitted)
    pub heads_fraction: f64,
    /// Head count statistics across trials
    pub heads: SummaryStatistics,
    /// Elapsed seconds statistics across trials
    pub time: SummaryStatistics,
    /// CPU tick statistics across trials
    pub cycles: CyclesStatistics,
    /// Extractor work summed over all trials
    pub draws: DrawCounters,
    /// Observed pairs per emitted bit
    pub pairs_per_bit: f64,
    /// Observed biased flips per emitted bit
    pub flips_per_bit: f64,
    /// Theoretical values for this bias and sequence length
    pub expectation: Expectation,
}

/// Run `config.trial_count` timed trials, calling `on_trial` after each one
///
/// `on_trial` receives the zero-based trial index and its result.
pub fn run_trials<S, F>(
    corrector: &mut BiasCorrector<S>,
    config: &ExperimentConfig,
    mut on_trial: F,
) -> Result<Vec<TrialResult>>
where
    S: UniformSampler,
    F: FnMut(usize, &TrialResult),
{
    config.validate()?;

    tracing::info!(
        trials = config.trial_count,
        length = config.sequence_length,
        bias = corrector.source().tails_probability(),
        "running experiment"
    );

    let mut trials = Vec::with_capacity(config.trial_count as usize);
    for index in 0..config.trial_count as usize {
        let trial = timed_sequence(corrector, config.sequence_length)?;
        tracing::debug!(
            trial = index,
            heads = trial.heads,
            seconds = trial.elapsed_secs(),
            pairs = trial.draws.pairs,
            "trial complete"
        );
        on_trial(index, &trial);
        trials.push(trial);
    }

    Ok(trials)
}

/// Summarize completed trials
///
/// Fails with [`Error::InvalidTrialCount`] when `trials` is empty.
pub fn summarize(
    trials: &[TrialResult],
    config: &ExperimentConfig,
    source: BiasedSource,
) -> Result<ExperimentSummary> {
    if trials.is_empty() {
        return Err(Error::InvalidTrialCount);
    }

    let n = trials.len();
    let trial_count = trial_count_of(n)?;
    let total_heads: u64 = trials.iter().map(|t| t.heads).sum();
    let head_samples: Vec<f64> = trials.iter().map(|t| t.heads as f64).collect();
    let time_samples: Vec<f64> = trials.iter().map(|t| t.elapsed_secs()).collect();
    let nanos: Vec<f64> = trials.iter().map(|t| t.elapsed.as_nanos_f64()).collect();
    let cycles: Vec<u64> = trials.iter().map(|t| t.elapsed.cycles).collect();

    let draws = trials
        .iter()
        .fold(DrawCounters::default(), |acc, t| DrawCounters {
            flips: acc.flips + t.draws.flips,
            pairs: acc.pairs + t.draws.pairs,
            rejected_pairs: acc.rejected_pairs + t.draws.rejected_pairs,
            bits: acc.bits + t.draws.bits,
        });

    let heads_fraction = if draws.bits == 0 {
        0.0
    } else {
        total_heads as f64 / draws.bits as f64
    };

    let time = compute_summary(&time_samples);

    let summary = ExperimentSummary {
        trial_count,
        sequence_length: config.sequence_length,
        bias: source.tails_probability(),
        avg_heads: total_heads as f64 / n as f64,
        avg_time: time.mean,
        min_time: time.min,
        max_time: time.max,
        heads_fraction,
        heads: compute_summary(&head_samples),
        time,
        cycles: compute_cycles_stats(&cycles, &nanos),
        draws,
        pairs_per_bit: draws.pairs_per_bit(),
        flips_per_bit: draws.flips_per_bit(),
        expectation: Expectation::new(source.tails_probability(), config.sequence_length),
    };

    tracing::info!(
        avg_heads = summary.avg_heads,
        avg_time = summary.avg_time,
        min_time = summary.min_time,
        max_time = summary.max_time,
        "experiment complete"
    );

    Ok(summary)
}

fn trial_count_of(n: usize) -> Result<u32> {
    u32::try_from(n).map_err(|_| Error::InvalidTrialCount)
}

/// Run an experiment and summarize it
pub fn run_experiment<S: UniformSampler>(
    corrector: &mut BiasCorrector<S>,
    config: &ExperimentConfig,
) -> Result<ExperimentSummary> {
    let trials = run_trials(corrector, config, |_, _| {})?;
    summarize(&trials, config, corrector.source())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::Elapsed;
    use crate::source::{ReplaySampler, RngSampler};
    use std::time::Duration;

    fn corrector(p: f64, seed: u64) -> BiasCorrector<RngSampler> {
        BiasCorrector::new(BiasedSource::new(p).unwrap(), RngSampler::seeded(seed))
    }

    fn trial(heads: u64, millis: u64) -> TrialResult {
        TrialResult {
            heads,
            sequence_length: 10,
            elapsed: Elapsed {
                duration: Duration::from_millis(millis),
                cycles: 0,
            },
            draws: DrawCounters {
                flips: 40,
                pairs: 20,
                rejected_pairs: 10,
                bits: 10,
            },
        }
    }

    #[test]
    fn test_zero_trials_rejected_before_drawing() {
        let mut corrector =
            BiasCorrector::new(BiasedSource::new(0.4).unwrap(), ReplaySampler::new(vec![0.1, 0.9]));
        let config = ExperimentConfig {
            trial_count: 0,
            sequence_length: 10,
        };

        assert_eq!(
            run_experiment(&mut corrector, &config),
            Err(Error::InvalidTrialCount)
        );
        assert_eq!(corrector.into_sampler().draws(), 0);
        assert_eq!(ExperimentConfig::new(0, 5), Err(Error::InvalidTrialCount));
    }

    #[test]
    fn test_summarize_aggregates() {
        let trials = vec![trial(4, 10), trial(6, 30), trial(5, 20)];
        let config = ExperimentConfig::new(3, 10).unwrap();
        let summary = summarize(&trials, &config, BiasedSource::new(0.4).unwrap()).unwrap();

        assert_eq!(summary.trial_count, 3);
        assert!((summary.avg_heads - 5.0).abs() < f64::EPSILON);
        assert!((summary.avg_time - 0.02).abs() < 1e-9);
        assert!((summary.min_time - 0.01).abs() < 1e-9);
        assert!((summary.max_time - 0.03).abs() < 1e-9);
        assert!((summary.heads_fraction - 0.5).abs() < f64::EPSILON);
        assert_eq!(summary.draws.pairs, 60);
        assert!((summary.pairs_per_bit - 2.0).abs() < f64::EPSILON);
        assert!((summary.expectation.expected_heads - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_summarize_empty_rejected() {
        let config = ExperimentConfig::default();
        let result = summarize(&[], &config, BiasedSource::new(0.4).unwrap());
        assert_eq!(result, Err(Error::InvalidTrialCount));
    }

    #[test]
    fn test_trial_count_does_not_truncate() {
        assert_eq!(trial_count_of(7), Ok(7));
        assert_eq!(trial_count_of(u32::MAX as usize), Ok(u32::MAX));
        #[cfg(target_pointer_width = "64")]
        assert_eq!(
            trial_count_of(u32::MAX as usize + 1),
            Err(Error::InvalidTrialCount)
        );
    }

    #[test]
    fn test_zero_length_experiment() {
        let mut corrector = corrector(0.4, 1);
        let config = ExperimentConfig::new(5, 0).unwrap();
        let summary = run_experiment(&mut corrector, &config).unwrap();

        assert_eq!(summary.avg_heads, 0.0);
        assert_eq!(summary.trial_count, 5);
        for t in [summary.avg_time, summary.min_time, summary.max_time] {
            assert!(t.is_finite() && t >= 0.0);
        }
        assert_eq!(summary.draws, DrawCounters::default());
    }

    #[test]
    fn test_experiment_bounds() {
        let mut corrector = corrector(0.4, 2);
        let config = ExperimentConfig::new(4, 2_000).unwrap();
        let summary = run_experiment(&mut corrector, &config).unwrap();

        assert!(summary.avg_heads >= 0.0 && summary.avg_heads <= 2_000.0);
        assert!(summary.min_time <= summary.avg_time);
        assert!(summary.avg_time <= summary.max_time);
        assert_eq!(summary.draws.bits, 8_000);
    }

    #[test]
    fn test_on_trial_called_in_order() {
        let mut corrector = corrector(0.4, 3);
        let config = ExperimentConfig::new(3, 10).unwrap();
        let mut seen = Vec::new();

        let trials = run_trials(&mut corrector, &config, |i, _| seen.push(i)).unwrap();

        assert_eq!(seen, vec![0, 1, 2]);
        assert_eq!(trials.len(), 3);
    }

    #[test]
    fn test_default_config() {
        let config = ExperimentConfig::default();
        assert_eq!(config.trial_count, 10);
        assert_eq!(config.sequence_length, 1_000_000);
    }
}
