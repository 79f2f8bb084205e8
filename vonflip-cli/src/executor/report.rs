//! Report Building
//!
//! Attaches metadata and the effective configuration to an executed
//! experiment.

use super::execution::{ExecutionConfig, ExecutionResult};
use super::metadata::build_report_meta;
use vonflip_report::{Report, ReportConfig};

/// Build a complete Report from an execution result
pub fn build_report(result: &ExecutionResult, config: &ExecutionConfig) -> Report {
    let report_config = ReportConfig {
        bias: config.source.tails_probability(),
        trial_count: config.experiment.trial_count,
        sequence_length: config.experiment.sequence_length,
        seed: config.seed,
        max_pairs: config.max_pairs,
    };

    Report::new(
        build_report_meta(),
        report_config,
        &result.trials,
        result.summary.clone(),
    )
}
