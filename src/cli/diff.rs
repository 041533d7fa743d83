//! Diff command handler.
//!
//! Implements the `diff` subcommand for comparing two records.

use crate::config::{DiffConfig, Validatable};
use crate::diff::RecordComparison;
use crate::pipeline::{compute_diff, exit_codes, output_report, parse_record_with_context};
use anyhow::{bail, Result};

/// Run the diff command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
#[allow(clippy::needless_pass_by_value)]
pub fn run_diff(config: DiffConfig) -> Result<i32> {
    let errors = config.validate();
    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        bail!("Invalid diff configuration: {}", messages.join("; "));
    }

    let quiet = config.behavior.quiet;
    let a = parse_record_with_context(&config.paths.a, quiet)?;
    let b = parse_record_with_context(&config.paths.b, quiet)?;

    let result = compute_diff(&config, a, b)?;
    let exit_code = determine_exit_code(&config, &result);

    output_report(&config, &result)?;
    Ok(exit_code)
}

/// Determine the appropriate exit code based on diff results and config flags.
const fn determine_exit_code(config: &DiffConfig, result: &RecordComparison) -> i32 {
    if config.behavior.fail_on_change && result.has_changes() {
        return exit_codes::CHANGES_DETECTED;
    }
    exit_codes::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::reports::ReportFormat;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn config(dir: &TempDir, a: &str, b: &str, fail_on_change: bool) -> DiffConfig {
        let app = AppConfig::builder()
            .output_format(ReportFormat::Json)
            .output_file(Some(dir.path().join("out.json")))
            .fail_on_change(fail_on_change)
            .quiet(true)
            .build();
        DiffConfig::from_app(
            &app,
            write(dir.path(), "a.json", a),
            write(dir.path(), "b.yaml", b),
        )
    }

    #[test]
    fn test_exit_code_on_change() {
        let tmp = TempDir::new().unwrap();
        let cfg = config(&tmp, r#"{"x": 1}"#, "x: 2\n", true);
        assert_eq!(run_diff(cfg).unwrap(), exit_codes::CHANGES_DETECTED);

        let written = std::fs::read_to_string(tmp.path().join("out.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["summary"]["altered"], 1);
    }

    #[test]
    fn test_exit_code_without_fail_flag() {
        let tmp = TempDir::new().unwrap();
        let cfg = config(&tmp, r#"{"x": 1}"#, "x: 2\n", false);
        assert_eq!(run_diff(cfg).unwrap(), exit_codes::SUCCESS);
    }

    #[test]
    fn test_reordered_records_are_unchanged() {
        let tmp = TempDir::new().unwrap();
        let cfg = config(&tmp, r#"{"x": [1, 2, 3]}"#, "x: [3, 2, 1]\n", true);
        assert_eq!(run_diff(cfg).unwrap(), exit_codes::SUCCESS);
    }

    #[test]
    fn test_invalid_cutoff_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let mut cfg = config(&tmp, "{}", "{}\n", false);
        cfg.diff.pair_cutoff = 2.0;
        assert!(run_diff(cfg).is_err());
    }
}
