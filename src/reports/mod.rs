//! Report generation for record comparisons.
//!
//! - JSON: classification, summary and raw entries for programmatic use
//! - Summary: compact human-readable counts
//! - Paths: one changed path per line, for shell pipelines

mod json;
mod paths;
mod summary;
mod types;

pub use json::JsonReporter;
pub use paths::PathsReporter;
pub use summary::SummaryReporter;
pub use types::{ReportConfig, ReportFormat, ReportMetadata};

use crate::diff::RecordComparison;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report from a comparison
    fn generate_diff_report(
        &self,
        result: &RecordComparison,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Write report to a writer
    fn write_diff_report(
        &self,
        result: &RecordComparison,
        config: &ReportConfig,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let report = self.generate_diff_report(result, config)?;
        writer.write_all(report.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    create_reporter_with_options(format, true, true)
}

/// Create a report generator with color and pretty-print control
#[must_use]
pub fn create_reporter_with_options(
    format: ReportFormat,
    use_color: bool,
    pretty: bool,
) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Summary => {
            if use_color {
                Box::new(SummaryReporter::new())
            } else {
                Box::new(SummaryReporter::new().no_color())
            }
        }
        ReportFormat::Json => Box::new(JsonReporter::new().pretty(pretty)),
        ReportFormat::Paths => Box::new(PathsReporter::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DiffEngine;
    use serde_json::json;

    #[test]
    fn test_reporters_match_requested_format() {
        for format in [ReportFormat::Summary, ReportFormat::Json, ReportFormat::Paths] {
            assert_eq!(create_reporter(format).format(), format);
        }
    }

    #[test]
    fn test_write_diff_report() {
        let result = DiffEngine::new()
            .compare(&json!({"a": 1}), &json!({"a": 1, "b": 2}))
            .unwrap();
        let mut buffer = Vec::new();
        create_reporter(ReportFormat::Paths)
            .write_diff_report(&result, &ReportConfig::new(), &mut buffer)
            .unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "+\troot['b']\n");
    }
}
