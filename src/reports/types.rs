//! Report type definitions.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Brief summary output
    #[default]
    Summary,
    /// Structured JSON output
    Json,
    /// One changed path per line, tab separated
    Paths,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Summary => write!(f, "summary"),
            Self::Json => write!(f, "json"),
            Self::Paths => write!(f, "paths"),
        }
    }
}

/// Configuration for report generation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Include the raw diff entries alongside the classification
    pub include_entries: bool,
    /// Report leaf paths instead of entry paths (paths format)
    pub leaf_paths: bool,
    /// Additional metadata to include
    pub metadata: ReportMetadata,
}

impl ReportConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            include_entries: true,
            leaf_paths: true,
            metadata: ReportMetadata::new(),
        }
    }
}

/// Metadata included in reports
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Path of record A
    pub record_a: Option<String>,
    /// Path of record B
    pub record_b: Option<String>,
    /// Tool version
    pub tool_version: String,
}

impl ReportMetadata {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_records(mut self, a: impl Into<String>, b: impl Into<String>) -> Self {
        self.record_a = Some(a.into());
        self.record_b = Some(b.into());
        self
    }
}
