//! Output Formatting
//!
//! Human-readable output formatting for experiment reports.
//!
//! Generates terminal-friendly output with:
//! - Average heads and execution time (mean, min, max)
//! - Observed values next to their theoretical expectation
//! - A per-trial table

use vonflip_core::TrialResult;
use vonflip_report::{Report, format_seconds};

/// Format a report for human-readable terminal display
pub fn format_human_output(report: &Report) -> String {
    let summary = &report.summary;
    let exp = &summary.expectation;
    let agreement = &report.agreement;
    let mut output = String::new();

    output.push('\n');
    output.push_str("Vonflip Results\n");
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");

    output.push_str(&format!(
        "  bias (tails): {}  trials: {}  sequence length: {}\n",
        report.config.bias, report.config.trial_count, report.config.sequence_length
    ));
    if let Some(seed) = report.config.seed {
        output.push_str(&format!("  seed: {}\n", seed));
    }
    output.push('\n');

    output.push_str(&format!("Average Heads : {}\n", summary.avg_heads));
    output.push_str(&format!(
        "Execution Time: {:.6} [s] (min: {:.6}, max: {:.6})\n",
        summary.avg_time, summary.min_time, summary.max_time
    ));
    output.push('\n');

    output.push_str("Theory\n");
    output.push_str(&"-".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "      heads: expected {:.1} ± {:.1}  observed {:.1}  ({:+.2} sd)\n",
        exp.expected_heads, exp.heads_std_dev, summary.avg_heads, agreement.heads_offset_std_devs
    ));
    output.push_str(&format!(
        "      heads fraction: {:.6}\n",
        summary.heads_fraction
    ));
    if summary.draws.bits > 0 {
        output.push_str(&format!(
            "      pairs/bit: expected {:.4}  observed {:.4}  (error {:.3}%)\n",
            exp.expected_pairs_per_bit,
            summary.pairs_per_bit,
            agreement.pairs_per_bit_error * 100.0
        ));
        output.push_str(&format!(
            "      flips/bit: expected {:.4}  observed {:.4}  (error {:.3}%)\n",
            exp.expected_flips_per_bit,
            summary.flips_per_bit,
            agreement.flips_per_bit_error * 100.0
        ));
        output.push_str(&format!(
            "      rejected pairs: {} of {}\n",
            summary.draws.rejected_pairs, summary.draws.pairs
        ));
    }
    output.push('\n');

    output.push_str("Timing\n");
    output.push_str(&"-".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "      mean: {}  median: {}  stddev: {}\n",
        format_seconds(summary.time.mean),
        format_seconds(summary.time.median),
        format_seconds(summary.time.std_dev)
    ));
    // Show CPU cycles if available
    if summary.cycles.mean_cycles > 0.0 {
        output.push_str(&format!(
            "      cycles: mean {:.0}  min {}  max {}  ({:.2} GHz)\n",
            summary.cycles.mean_cycles,
            summary.cycles.min_cycles,
            summary.cycles.max_cycles,
            summary.cycles.cycles_per_ns
        ));
    }
    output.push('\n');

    output.push_str("Trials\n");
    output.push_str(&"-".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "  {:>5}  {:>12}  {:>10}  {:>14}\n",
        "#", "heads", "fraction", "time"
    ));
    for trial in &report.trials {
        output.push_str(&format!(
            "  {:>5}  {:>12}  {:>10.6}  {:>14}\n",
            trial.index + 1,
            trial.heads,
            trial.heads_fraction,
            format_seconds(trial.elapsed_secs)
        ));
    }

    output
}

/// Format a single timed sequence
pub fn format_sequence_output(trial: &TrialResult) -> String {
    format!(
        "Total heads: {}\nTime: {} [s]\n",
        trial.heads,
        trial.elapsed_secs()
    )
}
