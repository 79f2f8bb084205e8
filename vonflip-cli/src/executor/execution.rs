//! Experiment Execution
//!
//! Builds the bias corrector from the resolved configuration and runs the
//! trials sequentially, ticking a progress bar as each one completes.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;
use vonflip_core::{
    BiasCorrector, BiasedSource, ExperimentConfig, ExperimentSummary, RngSampler, TrialResult,
    run_trials, summarize, timed_sequence,
};

/// Configuration for experiment execution
#[derive(Debug, Clone)]
pub struct ExecutionConfig {
    /// Validated biased source
    pub source: BiasedSource,
    /// Trial count and sequence length
    pub experiment: ExperimentConfig,
    /// Generator seed (entropy-seeded when `None`)
    pub seed: Option<u64>,
    /// Pair cap per emitted bit
    pub max_pairs: Option<u64>,
    /// Draw a progress bar while trials run
    pub show_progress: bool,
}

/// Result from executing an experiment
#[derive(Debug)]
pub struct ExecutionResult {
    /// Trials in execution order
    pub trials: Vec<TrialResult>,
    /// Aggregate over all trials
    pub summary: ExperimentSummary,
    /// Wall-clock time of the whole run, including summarizing
    pub total_duration_ms: f64,
}

/// Execute experiments described by an [`ExecutionConfig`]
pub struct Executor {
    config: ExecutionConfig,
}

impl Executor {
    /// Create a new executor
    pub fn new(config: ExecutionConfig) -> Self {
        Self { config }
    }

    /// Resolved configuration
    pub fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    fn build_corrector(&self) -> vonflip_core::Result<BiasCorrector<RngSampler>> {
        let sampler = RngSampler::from_seed_option(self.config.seed);
        match self.config.max_pairs {
            Some(cap) => BiasCorrector::with_pair_cap(self.config.source, sampler, cap),
            None => Ok(BiasCorrector::new(self.config.source, sampler)),
        }
    }

    /// Run every trial of the experiment and summarize them
    pub fn execute(&self) -> anyhow::Result<ExecutionResult> {
        let start = Instant::now();
        let experiment = &self.config.experiment;
        experiment.validate()?;
        let mut corrector = self.build_corrector()?;

        let pb = if self.config.show_progress {
            ProgressBar::new(u64::from(experiment.trial_count))
        } else {
            ProgressBar::hidden()
        };
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let trials = run_trials(&mut corrector, experiment, |index, trial| {
            pb.set_message(format!("trial {} heads={}", index + 1, trial.heads));
            pb.inc(1);
        });
        let trials = match trials {
            Ok(trials) => trials,
            Err(e) => {
                pb.abandon_with_message("Failed");
                return Err(e.into());
            }
        };
        pb.finish_with_message("Complete");

        let summary = summarize(&trials, experiment, corrector.source())?;

        Ok(ExecutionResult {
            trials,
            summary,
            total_duration_ms: start.elapsed().as_secs_f64() * 1000.0,
        })
    }

    /// Run a single timed sequence of `experiment.sequence_length` bits
    pub fn execute_sequence(&self) -> anyhow::Result<TrialResult> {
        let mut corrector = self.build_corrector()?;
        let trial = timed_sequence(&mut corrector, self.config.experiment.sequence_length)?;
        tracing::info!(
            heads = trial.heads,
            seconds = trial.elapsed_secs(),
            "sequence complete"
        );
        Ok(trial)
    }
}
