//! Experiment Executor
//!
//! Runs experiments and turns them into reports.
//!
//! ## Pipeline Overview
//!
//! ```text
//! vonflip.toml + CLI flags
//!       │
//!       ▼
//! ┌─────────────┐
//! │  execution  │  Build the corrector, run trials with progress
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │   report    │  Attach metadata, configuration, agreement
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │ formatting  │  Human-readable output
//! └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`execution`] - Corrector construction and trial execution
//! - [`report`] - Report building
//! - [`formatting`] - Human-readable output formatting
//! - [`metadata`] - System metadata collection

mod execution;
mod formatting;
mod metadata;
mod report;

pub use execution::{ExecutionConfig, ExecutionResult, Executor};
pub use formatting::{format_human_output, format_sequence_output};
pub use metadata::build_report_meta;
pub use report::build_report;
