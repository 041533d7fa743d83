//! Pipeline orchestration for record comparisons.
//!
//! Shared load → diff → report logic used by the CLI command handlers.

mod diff_stage;
mod output;
mod parse;
mod report_stage;

pub use diff_stage::{build_engine, compute_diff};
pub use output::{should_use_color, write_output, OutputTarget};
pub use parse::{load_record, parse_record_str, parse_record_with_context, RecordFormat};
pub use report_stage::{output_comparison, output_report};

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to read or parse a record file
    #[error("Parse failed for {path}: {source}")]
    ParseFailed {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    /// Diff computation failed
    #[error("Diff failed: {source}")]
    DiffFailed {
        #[source]
        source: anyhow::Error,
    },

    /// Report generation or output failed
    #[error("Report failed: {source}")]
    ReportFailed {
        #[source]
        source: anyhow::Error,
    },
}

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - no changes detected (or fail-on-change disabled)
    pub const SUCCESS: i32 = 0;
    /// Changes were detected
    pub const CHANGES_DETECTED: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
