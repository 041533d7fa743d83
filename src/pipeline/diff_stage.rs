//! Diff computation stage.

use crate::config::DiffConfig;
use crate::diff::{DiffEngine, RecordComparison};
use crate::utils::try_with_timeout;
use anyhow::{Context, Result};
use serde_json::Value;

/// Build the diff engine described by `config`.
#[must_use]
pub fn build_engine(config: &DiffConfig) -> DiffEngine {
    DiffEngine::new()
        .with_unordered_config(config.diff.to_unordered_config())
        .with_options(config.diff.to_engine_options())
}

/// Run the diff and classification, under the configured deadline.
pub fn compute_diff(config: &DiffConfig, a: Value, b: Value) -> Result<RecordComparison> {
    let quiet = config.behavior.quiet;
    let engine = build_engine(config);

    if !quiet {
        tracing::info!("Computing order-insensitive diff...");
    }

    let result = try_with_timeout(config.behavior.timeout(), "comparing records", move || {
        engine.compare(&a, &b)
    })
    .map_err(|e| super::PipelineError::DiffFailed { source: e.into() })
    .context("Failed to compute diff")?;

    if !quiet {
        tracing::info!(
            "Diff complete: {} added, {} removed, {} altered (distance {:.4})",
            result.summary.added,
            result.summary.removed,
            result.summary.altered,
            result.summary.deep_distance
        );
    }
    Ok(result)
}
