#![warn(missing_docs)]
//! Vonflip Report - Experiment Reporting
//!
//! Generates output formats:
//! - JSON (machine-readable)
//! - Human-readable terminal text (rendered by the CLI from the same model)

mod json;
mod report;

pub use json::{REPORT_SCHEMA_VERSION, generate_json_report};
pub use report::{Agreement, Report, ReportConfig, ReportMeta, SystemInfo, TrialRecord};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON with full schema
    Json,
    /// Human-readable terminal output
    Human,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Format a duration given in seconds with an adaptive unit
pub fn format_seconds(secs: f64) -> String {
    if !secs.is_finite() {
        return format!("{} s", secs);
    }
    let abs = secs.abs();
    if abs >= 1.0 {
        format!("{:.3} s", secs)
    } else if abs >= 1e-3 {
        format!("{:.3} ms", secs * 1e3)
    } else if abs >= 1e-6 {
        format!("{:.3} us", secs * 1e6)
    } else {
        format!("{:.0} ns", secs * 1e9)
    }
}
