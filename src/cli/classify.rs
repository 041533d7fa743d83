//! Classify command handler.
//!
//! Runs a diff report produced by an external tree differ through the
//! classifier.

use crate::config::AppConfig;
use crate::diff::{DiffEngine, DiffReport, PrecomputedDiffer};
use crate::pipeline::{exit_codes, output_comparison};
use crate::reports::{ReportConfig, ReportMetadata};
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

/// Classify the report at `report_path`, returning the desired exit code.
pub fn run_classify(report_path: &Path, config: &AppConfig) -> Result<i32> {
    let content = std::fs::read_to_string(report_path)
        .with_context(|| format!("Failed to read diff report: {}", report_path.display()))?;
    let report: DiffReport = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse diff report: {}", report_path.display()))?;

    if !config.behavior.quiet {
        tracing::info!("Classifying {} diff entries", report.entries.len());
    }

    let result = DiffEngine::new()
        .with_differ(Box::new(PrecomputedDiffer::new(report)))
        .with_options(config.diff.to_engine_options())
        .compare(&Value::Null, &Value::Null)
        .with_context(|| format!("Failed to classify {}", report_path.display()))?;

    let name = report_path.display().to_string();
    let report_config = ReportConfig {
        include_entries: config.output.include_entries,
        leaf_paths: config.output.leaf_paths,
        metadata: ReportMetadata::new().with_records(name.clone(), name),
    };
    output_comparison(&config.output, config.behavior.quiet, &report_config, &result)?;

    if config.behavior.fail_on_change && result.has_changes() {
        return Ok(exit_codes::CHANGES_DETECTED);
    }
    Ok(exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::ReportFormat;
    use tempfile::TempDir;

    #[test]
    fn test_classify_external_report() {
        let tmp = TempDir::new().unwrap();
        let report = tmp.path().join("report.json");
        std::fs::write(
            &report,
            r#"{
                "entries": [{
                    "kind": "dictionary_item_added",
                    "t1": {"state": "not_present"},
                    "t2": {"state": "present", "value": {"k": [1, 2]}},
                    "path1": ["x"],
                    "path2": ["x"]
                }],
                "deep_distance": 0.5
            }"#,
        )
        .unwrap();
        let out = tmp.path().join("paths.txt");
        let config = AppConfig::builder()
            .output_format(ReportFormat::Paths)
            .output_file(Some(out.clone()))
            .fail_on_change(true)
            .quiet(true)
            .build();

        assert_eq!(run_classify(&report, &config).unwrap(), exit_codes::CHANGES_DETECTED);
        let listing = std::fs::read_to_string(out).unwrap();
        assert_eq!(listing, "+\troot['x']['k'][0]\n+\troot['x']['k'][1]");
    }

    #[test]
    fn test_neither_side_present_fails() {
        let tmp = TempDir::new().unwrap();
        let report = tmp.path().join("bad.json");
        std::fs::write(
            &report,
            r#"{"entries": [{"kind": "values_changed",
                "t1": {"state": "not_present"}, "t2": {"state": "not_present"},
                "path1": [], "path2": []}]}"#,
        )
        .unwrap();
        let config = AppConfig::builder().quiet(true).build();
        assert!(run_classify(&report, &config).is_err());
    }
}
