//! Audit command handler.
//!
//! Compares every record in a reference directory with the record of the
//! same file name in a candidate directory.

use crate::config::AppConfig;
use crate::diff::{DiffEngine, RecordComparison};
use crate::pipeline::{exit_codes, load_record, write_output, OutputTarget};
use crate::utils::try_with_timeout;
use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Below this many record pairs, comparisons run sequentially.
const PARALLEL_THRESHOLD: usize = 50;

/// Outcome for one record pair.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEntry {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deep_distance: Option<f64>,
    pub added: usize,
    pub removed: usize,
    pub altered: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuditEntry {
    fn from_comparison(name: String, result: &RecordComparison) -> Self {
        Self {
            name,
            deep_distance: Some(result.summary.deep_distance),
            added: result.summary.added,
            removed: result.summary.removed,
            altered: result.summary.altered,
            error: None,
        }
    }

    fn failed(name: String, error: &anyhow::Error) -> Self {
        Self {
            name,
            deep_distance: None,
            added: 0,
            removed: 0,
            altered: 0,
            error: Some(format!("{error:#}")),
        }
    }

    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.added + self.removed + self.altered > 0
    }
}

/// Aggregate over a whole audit run.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub records: Vec<AuditEntry>,
    /// Reference records with no candidate counterpart
    pub missing: Vec<String>,
    pub changed: usize,
    pub failed: usize,
    /// Mean distance over records that compared successfully
    pub mean_distance: f64,
}

/// Compare all record pairs and build the report.
pub fn audit_dirs(reference: &Path, candidate: &Path, config: &AppConfig) -> Result<AuditReport> {
    let mut pairs = Vec::new();
    let mut missing = Vec::new();
    for path in record_files(reference)? {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let counterpart = candidate.join(&name);
        if counterpart.exists() {
            pairs.push((name, path, counterpart));
        } else {
            missing.push(name);
        }
    }

    tracing::info!(
        "Auditing {} record pairs ({} without counterpart)",
        pairs.len(),
        missing.len()
    );

    let compare = |(name, a, b): &(String, PathBuf, PathBuf)| match compare_pair(a, b, config) {
        Ok(result) => AuditEntry::from_comparison(name.clone(), &result),
        Err(e) => {
            tracing::warn!("{name}: {e:#}");
            AuditEntry::failed(name.clone(), &e)
        }
    };
    let records: Vec<AuditEntry> = if pairs.len() >= PARALLEL_THRESHOLD {
        pairs.par_iter().map(compare).collect()
    } else {
        pairs.iter().map(compare).collect()
    };

    let distances: Vec<f64> = records.iter().filter_map(|r| r.deep_distance).collect();
    let mean_distance = if distances.is_empty() {
        0.0
    } else {
        distances.iter().sum::<f64>() / distances.len() as f64
    };

    Ok(AuditReport {
        changed: records.iter().filter(|r| r.has_changes()).count(),
        failed: records.iter().filter(|r| r.error.is_some()).count(),
        records,
        missing,
        mean_distance,
    })
}

/// Run the audit command, returning the desired exit code.
pub fn run_audit(
    reference: &Path,
    candidate: &Path,
    config: &AppConfig,
    output_file: Option<PathBuf>,
) -> Result<i32> {
    let report = audit_dirs(reference, candidate, config)?;
    let json = if config.output.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    write_output(&json, &OutputTarget::from_option(output_file), config.behavior.quiet)?;

    if report.failed > 0 {
        return Ok(exit_codes::ERROR);
    }
    if config.behavior.fail_on_change && (report.changed > 0 || !report.missing.is_empty()) {
        return Ok(exit_codes::CHANGES_DETECTED);
    }
    Ok(exit_codes::SUCCESS)
}

fn compare_pair(a: &Path, b: &Path, config: &AppConfig) -> Result<RecordComparison> {
    let a = load_record(a)?;
    let b = load_record(b)?;
    let unordered = config.diff.to_unordered_config();
    let options = config.diff.to_engine_options();
    let result = try_with_timeout(config.behavior.timeout(), "comparing records", move || {
        DiffEngine::new()
            .with_unordered_config(unordered)
            .with_options(options)
            .compare(&a, &b)
    })?;
    Ok(result)
}

/// JSON and YAML files directly inside `dir`, sorted by name.
fn record_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        let is_record = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| matches!(e.to_ascii_lowercase().as_str(), "json" | "yaml" | "yml"));
        if path.is_file() && is_record {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, PathBuf, PathBuf) {
        let tmp = TempDir::new().unwrap();
        let reference = tmp.path().join("ref");
        let candidate = tmp.path().join("cand");
        std::fs::create_dir_all(&reference).unwrap();
        std::fs::create_dir_all(&candidate).unwrap();
        std::fs::write(reference.join("same.json"), r#"{"a": [1, 2]}"#).unwrap();
        std::fs::write(candidate.join("same.json"), r#"{"a": [2, 1]}"#).unwrap();
        std::fs::write(reference.join("diff.yaml"), "a: 1\n").unwrap();
        std::fs::write(candidate.join("diff.yaml"), "a: 2\n").unwrap();
        std::fs::write(reference.join("lonely.json"), "{}").unwrap();
        std::fs::write(reference.join("notes.txt"), "ignored").unwrap();
        (tmp, reference, candidate)
    }

    #[test]
    fn test_audit_dirs() {
        let (_tmp, reference, candidate) = setup();
        let report = audit_dirs(&reference, &candidate, &AppConfig::default()).unwrap();
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records[0].name, "diff.yaml");
        assert_eq!(report.records[0].altered, 1);
        assert_eq!(report.records[1].name, "same.json");
        assert!(!report.records[1].has_changes());
        assert_eq!(report.missing, vec!["lonely.json".to_string()]);
        assert_eq!(report.changed, 1);
        assert_eq!(report.failed, 0);
        assert!((report.mean_distance - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_broken_candidate_is_reported() {
        let (_tmp, reference, candidate) = setup();
        std::fs::write(candidate.join("same.json"), "{oops").unwrap();
        let out = reference.join("..").join("audit.json");
        let config = AppConfig::builder().quiet(true).build();
        let code = run_audit(&reference, &candidate, &config, Some(out)).unwrap();
        assert_eq!(code, exit_codes::ERROR);
    }
}
