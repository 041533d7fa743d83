//! Configuration types for record-diff operations.

use crate::diff::{EngineOptions, UnorderedDiffConfig};
use crate::matching::MatchStrategy;
use crate::reports::{ReportConfig, ReportFormat, ReportMetadata};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::defaults::{
    DEFAULT_EXHAUSTIVE_LIMIT, DEFAULT_MAX_PAIRING_LEN, DEFAULT_PAIR_CUTOFF,
};

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// CLI arguments override values loaded from a config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Tree differ tuning
    pub diff: DifferConfig,
    /// Best-match solver selection
    pub matching: MatchingConfig,
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the sequence pairing cutoff.
    pub const fn pair_cutoff(mut self, cutoff: f64) -> Self {
        self.config.diff.pair_cutoff = cutoff;
        self
    }

    /// Deduplicate classification lists.
    pub const fn deduplicate(mut self, deduplicate: bool) -> Self {
        self.config.diff.deduplicate = deduplicate;
        self
    }

    /// Select the best-match solver.
    pub const fn match_strategy(mut self, strategy: MatchStrategy) -> Self {
        self.config.matching.strategy = strategy;
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Disable colored output.
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    /// Enable fail-on-change mode.
    pub const fn fail_on_change(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_change = fail;
        self
    }

    /// Enable quiet mode.
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    /// Set the diff deadline in seconds (0 disables it).
    pub const fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.behavior.timeout_secs = secs;
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Section Configurations
// ============================================================================

/// Tree differ tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DifferConfig {
    /// Sequence items further apart than this (0.0-1.0) are reported as
    /// removed plus added instead of changed
    #[schemars(range(min = 0.0, max = 1.0))]
    pub pair_cutoff: f64,
    /// Pair sequence items by position once this many are left unmatched
    #[schemars(range(min = 1))]
    pub max_pairing_len: usize,
    /// Drop repeated paths from classification lists
    pub deduplicate: bool,
}

impl Default for DifferConfig {
    fn default() -> Self {
        Self {
            pair_cutoff: DEFAULT_PAIR_CUTOFF,
            max_pairing_len: DEFAULT_MAX_PAIRING_LEN,
            deduplicate: false,
        }
    }
}

impl DifferConfig {
    #[must_use]
    pub fn to_unordered_config(&self) -> UnorderedDiffConfig {
        UnorderedDiffConfig {
            pair_cutoff: self.pair_cutoff,
            max_pairing_len: self.max_pairing_len,
        }
    }

    #[must_use]
    pub const fn to_engine_options(&self) -> EngineOptions {
        EngineOptions {
            deduplicate: self.deduplicate,
        }
    }
}

/// Best-match solver selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MatchingConfig {
    /// Solver: hungarian or exhaustive
    pub strategy: MatchStrategy,
    /// Largest candidate list the exhaustive solver accepts
    #[schemars(range(min = 1))]
    pub exhaustive_limit: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            strategy: MatchStrategy::Hungarian,
            exhaustive_limit: DEFAULT_EXHAUSTIVE_LIMIT,
        }
    }
}

/// Output-related configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Disable colored output
    pub no_color: bool,
    /// List leaf paths rather than entry paths (paths format)
    pub leaf_paths: bool,
    /// Include raw diff entries in JSON output
    pub include_entries: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Summary,
            file: None,
            pretty: true,
            no_color: false,
            leaf_paths: true,
            include_entries: true,
        }
    }
}

/// Behavior flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit with code 1 if any change is detected
    pub fail_on_change: bool,
    /// Suppress non-essential output
    pub quiet: bool,
    /// Abort a comparison after this many seconds (0 = no deadline)
    pub timeout_secs: u64,
}

impl BehaviorConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// ============================================================================
// Command Configurations
// ============================================================================

/// Configuration for a single diff run
#[derive(Debug, Clone)]
pub struct DiffConfig {
    /// Paths to compare
    pub paths: DiffPaths,
    /// Tree differ tuning
    pub diff: DifferConfig,
    /// Output configuration
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

/// Paths for diff operation
#[derive(Debug, Clone)]
pub struct DiffPaths {
    /// Path to record A
    pub a: PathBuf,
    /// Path to record B
    pub b: PathBuf,
}

impl DiffConfig {
    /// Combine the loaded application config with the records to compare.
    #[must_use]
    pub fn from_app(app: &AppConfig, a: PathBuf, b: PathBuf) -> Self {
        Self {
            paths: DiffPaths { a, b },
            diff: app.diff.clone(),
            output: app.output.clone(),
            behavior: app.behavior.clone(),
        }
    }

    /// Report settings derived from this run.
    #[must_use]
    pub fn report_config(&self) -> ReportConfig {
        ReportConfig {
            include_entries: self.output.include_entries,
            leaf_paths: self.output.leaf_paths,
            metadata: ReportMetadata::new().with_records(
                self.paths.a.to_string_lossy(),
                self.paths.b.to_string_lossy(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = AppConfig::builder()
            .pair_cutoff(0.5)
            .deduplicate(true)
            .match_strategy(MatchStrategy::Exhaustive)
            .output_format(ReportFormat::Json)
            .fail_on_change(true)
            .timeout_secs(5)
            .build();
        assert_eq!(config.diff.pair_cutoff, 0.5);
        assert!(config.diff.deduplicate);
        assert_eq!(config.matching.strategy, MatchStrategy::Exhaustive);
        assert_eq!(config.output.format, ReportFormat::Json);
        assert!(config.behavior.fail_on_change);
        assert_eq!(config.behavior.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_diff_config_report_metadata() {
        let app = AppConfig::default();
        let config = DiffConfig::from_app(&app, PathBuf::from("a.json"), PathBuf::from("b.yaml"));
        let report = config.report_config();
        assert_eq!(report.metadata.record_a.as_deref(), Some("a.json"));
        assert_eq!(report.metadata.record_b.as_deref(), Some("b.yaml"));
        assert!(report.leaf_paths);
    }

    #[test]
    fn test_differ_conversion() {
        let differ = DifferConfig {
            pair_cutoff: 0.1,
            max_pairing_len: 4,
            deduplicate: true,
        };
        assert_eq!(differ.to_unordered_config().pair_cutoff, 0.1);
        assert_eq!(differ.to_unordered_config().max_pairing_len, 4);
        assert!(differ.to_engine_options().deduplicate);
    }
}
