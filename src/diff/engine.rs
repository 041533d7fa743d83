//! Diff engine: run a tree differ and classify its report.

use super::{classify, Classification, ClassificationSummary, DiffReport, TreeDiffer};
use super::{UnorderedDiffConfig, UnorderedDiffer};
use crate::error::{ErrorContext, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Post-processing applied to every classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// Drop repeated paths from the classification lists.
    pub deduplicate: bool,
}

/// Everything produced by one comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordComparison {
    /// Name of the differ that produced the report
    pub differ: String,
    pub report: DiffReport,
    pub classification: Classification,
    pub summary: ClassificationSummary,
}

impl RecordComparison {
    #[must_use]
    pub const fn has_changes(&self) -> bool {
        self.summary.has_changes()
    }
}

/// Compares records with a pluggable [`TreeDiffer`].
pub struct DiffEngine {
    differ: Box<dyn TreeDiffer>,
    options: EngineOptions,
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffEngine {
    /// Create an engine using [`UnorderedDiffer`] with default settings
    #[must_use]
    pub fn new() -> Self {
        Self {
            differ: Box::new(UnorderedDiffer::new()),
            options: EngineOptions::default(),
        }
    }

    /// Use the built-in differ with custom tuning
    #[must_use]
    pub fn with_unordered_config(self, config: UnorderedDiffConfig) -> Self {
        self.with_differ(Box::new(UnorderedDiffer::with_config(config)))
    }

    /// Replace the tree differ
    #[must_use]
    pub fn with_differ(mut self, differ: Box<dyn TreeDiffer>) -> Self {
        self.differ = differ;
        self
    }

    #[must_use]
    pub const fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// Deduplicate classification lists
    #[must_use]
    pub const fn deduplicate(mut self, deduplicate: bool) -> Self {
        self.options.deduplicate = deduplicate;
        self
    }

    #[must_use]
    pub fn differ_name(&self) -> &str {
        self.differ.name()
    }

    #[must_use]
    pub const fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Diff record `a` against record `b` and classify the result
    pub fn compare(&self, a: &Value, b: &Value) -> Result<RecordComparison> {
        let report = self
            .differ
            .diff(a, b)
            .with_context(|| format!("running differ '{}'", self.differ.name()))?;
        tracing::debug!(
            differ = self.differ.name(),
            entries = report.entries.len(),
            deep_distance = report.deep_distance,
            "diff computed"
        );
        self.classify_report(report)
    }

    /// Classify a report produced elsewhere
    pub fn classify_report(&self, report: DiffReport) -> Result<RecordComparison> {
        let mut classification = classify(&report)?;
        if self.options.deduplicate {
            classification = classification.deduplicated();
        }
        let summary = classification.summary();
        Ok(RecordComparison {
            differ: self.differ.name().to_string(),
            report,
            classification,
            summary,
        })
    }
}
