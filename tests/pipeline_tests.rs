//! Pipeline and CLI integration tests.
//!
//! These tests exercise the full load → diff → report pipeline,
//! error handling paths, and CLI command handlers with real fixture files.

use record_diff::cli::{run_audit, run_classify, run_diff, run_match};
use record_diff::config::{AppConfig, DiffConfig, MatchingConfig};
use record_diff::pipeline::{
    compute_diff, exit_codes, output_report, parse_record_with_context, write_output,
    OutputTarget, RecordFormat,
};
use record_diff::reports::ReportFormat;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn diff_config(format: ReportFormat, out: &Path) -> DiffConfig {
    let app = AppConfig::builder()
        .output_format(format)
        .output_file(Some(out.to_path_buf()))
        .quiet(true)
        .build();
    DiffConfig::from_app(
        &app,
        fixture_path("order_a.json"),
        fixture_path("order_b.yaml"),
    )
}

fn read_json(path: &Path) -> serde_json::Value {
    let content = std::fs::read_to_string(path).expect("output should exist");
    serde_json::from_str(&content).expect("output should be JSON")
}

// ============================================================================
// Pipeline Parse Stage Tests
// ============================================================================

mod parse_stage {
    use super::*;

    #[test]
    fn parse_json_and_yaml_fixtures() {
        let a = parse_record_with_context(&fixture_path("order_a.json"), true).unwrap();
        let b = parse_record_with_context(&fixture_path("order_b.yaml"), true).unwrap();
        assert_eq!(a["order"]["id"], b["order"]["id"]);
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            RecordFormat::from_path(Path::new("x.yml")),
            RecordFormat::Yaml
        );
        assert_eq!(
            RecordFormat::from_path(Path::new("x.json")),
            RecordFormat::Json
        );
    }

    #[test]
    fn missing_file_mentions_path() {
        let err = parse_record_with_context(Path::new("/nonexistent/record.json"), true)
            .expect_err("missing file should fail");
        assert!(format!("{err:#}").contains("/nonexistent/record.json"));
    }

    #[test]
    fn malformed_record_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.json");
        std::fs::write(&path, "{\"a\": [1, 2").unwrap();
        assert!(parse_record_with_context(&path, true).is_err());
    }
}

// ============================================================================
// Diff and Report Stage Tests
// ============================================================================

mod diff_stage {
    use super::*;

    #[test]
    fn compute_and_report_json() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("report.json");
        let config = diff_config(ReportFormat::Json, &out);

        let a = parse_record_with_context(&config.paths.a, true).unwrap();
        let b = parse_record_with_context(&config.paths.b, true).unwrap();
        let result = compute_diff(&config, a, b).unwrap();
        output_report(&config, &result).unwrap();

        let json = read_json(&out);
        assert_eq!(json["metadata"]["differ"], "unordered");
        assert_eq!(json["summary"]["added"], 1);
        assert_eq!(json["summary"]["altered"], 2);
        assert_eq!(json["classification"]["paths_added"][0], serde_json::json!(["tags", 2]));
        assert_eq!(json["entries"].as_array().map(Vec::len), Some(3));
    }

    #[test]
    fn paths_report_lists_leaves() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("paths.txt");
        let config = diff_config(ReportFormat::Paths, &out);
        assert_eq!(run_diff(config).unwrap(), exit_codes::SUCCESS);

        let listing = std::fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines.contains(&"+\troot['tags'][2]"));
        assert!(lines.contains(&"<\troot['items'][0]['qty']"));
        assert!(lines.contains(&">\troot['items'][1]['qty']"));
    }

    #[test]
    fn summary_report_without_color() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("summary.txt");
        let config = diff_config(ReportFormat::Summary, &out);
        run_diff(config).unwrap();

        let summary = std::fs::read_to_string(&out).unwrap();
        assert!(summary.contains("Distance:  0.2000"));
        assert!(!summary.contains('\u{1b}'));
    }

    #[test]
    fn fail_on_change_sets_exit_code() {
        let tmp = TempDir::new().unwrap();
        let mut config = diff_config(ReportFormat::Json, &tmp.path().join("out.json"));
        config.behavior.fail_on_change = true;
        assert_eq!(run_diff(config).unwrap(), exit_codes::CHANGES_DETECTED);
    }

    #[test]
    fn invalid_cutoff_is_rejected_before_loading() {
        let tmp = TempDir::new().unwrap();
        let mut config = diff_config(ReportFormat::Json, &tmp.path().join("out.json"));
        config.diff.pair_cutoff = 2.0;
        let err = run_diff(config).expect_err("cutoff above 1 should be rejected");
        assert!(err.to_string().contains("diff.pair_cutoff"));
    }

    #[test]
    fn write_output_to_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("written.txt");
        write_output("hello", &OutputTarget::File(path.clone()), true).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "hello");
    }
}

// ============================================================================
// CLI Handler Tests
// ============================================================================

mod cli_handlers {
    use super::*;

    #[test]
    fn classify_fixture_report() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("classified.json");
        let config = AppConfig::builder()
            .output_format(ReportFormat::Json)
            .output_file(Some(out.clone()))
            .fail_on_change(true)
            .quiet(true)
            .build();

        let code = run_classify(&fixture_path("report.json"), &config).unwrap();
        assert_eq!(code, exit_codes::CHANGES_DETECTED);

        let json = read_json(&out);
        assert_eq!(json["metadata"]["differ"], "precomputed");
        assert_eq!(json["summary"]["leaves_added"], 3);
        assert_eq!(json["summary"]["deep_distance"], 0.4);
    }

    #[test]
    fn match_fixture_problem() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("assignment.json");
        run_match(
            &fixture_path("match_problem.json"),
            &MatchingConfig::default(),
            Some(out.clone()),
            true,
        )
        .unwrap();

        let json = read_json(&out);
        assert_eq!(json["pairs"]["0"], 1);
        assert_eq!(json["pairs"]["1"], 0);
        assert!(json["pairs"]["2"].is_null());
    }

    #[test]
    fn audit_fixture_directories() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("audit.json");
        let config = AppConfig::builder().fail_on_change(true).quiet(true).build();

        let code = run_audit(
            &fixture_path("audit/reference"),
            &fixture_path("audit/candidate"),
            &config,
            Some(out.clone()),
        )
        .unwrap();
        assert_eq!(code, exit_codes::CHANGES_DETECTED);

        let json = read_json(&out);
        assert_eq!(json["missing"], serde_json::json!(["orphan.json"]));
        assert_eq!(json["changed"], 1);
        let records = json["records"].as_array().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["name"], "order.json");
        assert_eq!(records[0]["deep_distance"], 0.0);
        assert_eq!(records[1]["name"], "widget.yaml");
        assert_eq!(records[1]["removed"], 1);
    }
}
