//! Report output stage.

use super::{should_use_color, write_output, OutputTarget};
use crate::config::{DiffConfig, OutputConfig};
use crate::diff::RecordComparison;
use crate::reports::{create_reporter_with_options, ReportConfig};
use anyhow::Result;

/// Render `result` in the configured format and write it to the configured
/// destination.
pub fn output_report(config: &DiffConfig, result: &RecordComparison) -> Result<()> {
    output_comparison(
        &config.output,
        config.behavior.quiet,
        &config.report_config(),
        result,
    )
}

/// Like [`output_report`], for comparisons that did not come from two record
/// files.
pub fn output_comparison(
    output: &OutputConfig,
    quiet: bool,
    report_config: &ReportConfig,
    result: &RecordComparison,
) -> Result<()> {
    let output_target = OutputTarget::from_option(output.file.clone());
    let use_color = should_use_color(output.no_color, &output_target);
    let reporter = create_reporter_with_options(output.format, use_color, output.pretty);

    let report = reporter
        .generate_diff_report(result, report_config)
        .map_err(|e| super::PipelineError::ReportFailed { source: e.into() })?;

    write_output(report.trim_end_matches('\n'), &output_target, quiet)
}
