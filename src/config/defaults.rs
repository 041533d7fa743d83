//! Default configurations and presets for record-diff.

use super::types::{AppConfig, BehaviorConfig, DifferConfig, MatchingConfig, OutputConfig};
use crate::reports::ReportFormat;

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets for common use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Default balanced settings suitable for most cases
    Default,
    /// CI/CD: machine-readable output, fail on changes
    CiCd,
    /// Strict: sequence items are only paired when identical
    Strict,
    /// Lenient: pair loosely similar sequence items
    Lenient,
}

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::CiCd => "ci-cd",
            Self::Strict => "strict",
            Self::Lenient => "lenient",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" | "balanced" => Some(Self::Default),
            "ci-cd" | "ci" | "cd" | "pipeline" => Some(Self::CiCd),
            "strict" | "exact" => Some(Self::Strict),
            "lenient" | "loose" | "permissive" => Some(Self::Lenient),
            _ => None,
        }
    }

    /// Get a description of this preset.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Balanced settings suitable for most record comparisons",
            Self::CiCd => "Machine-readable output optimized for CI/CD pipelines",
            Self::Strict => "Report any non-identical sequence item as removed and added",
            Self::Lenient => "Treat loosely similar sequence items as the same item",
        }
    }

    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::CiCd, Self::Strict, Self::Lenient]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Preset Implementations
// ============================================================================

impl AppConfig {
    /// Create an `AppConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::CiCd => Self::ci_cd_preset(),
            ConfigPreset::Strict => Self::strict_preset(),
            ConfigPreset::Lenient => Self::lenient_preset(),
        }
    }

    /// CI/CD pipeline preset.
    ///
    /// - JSON output for machine parsing
    /// - Fail on any changes
    /// - Quiet mode to reduce noise
    #[must_use]
    pub fn ci_cd_preset() -> Self {
        Self {
            diff: DifferConfig {
                deduplicate: true,
                ..DifferConfig::default()
            },
            matching: MatchingConfig::default(),
            output: OutputConfig {
                format: ReportFormat::Json,
                pretty: false,
                no_color: true,
                ..OutputConfig::default()
            },
            behavior: BehaviorConfig {
                fail_on_change: true,
                quiet: true,
                timeout_secs: 300,
            },
        }
    }

    /// Strict preset: any difference inside a sequence item makes it a
    /// different item.
    #[must_use]
    pub fn strict_preset() -> Self {
        Self {
            diff: DifferConfig {
                pair_cutoff: 0.0,
                ..DifferConfig::default()
            },
            ..Self::default()
        }
    }

    /// Lenient preset: pair sequence items that share at least a third of
    /// their leaves.
    #[must_use]
    pub fn lenient_preset() -> Self {
        Self {
            diff: DifferConfig {
                pair_cutoff: 0.66,
                ..DifferConfig::default()
            },
            ..Self::default()
        }
    }
}

// ============================================================================
// Default Value Constants
// ============================================================================

/// Default distance above which paired sequence items are split.
pub const DEFAULT_PAIR_CUTOFF: f64 = 0.3;

/// Default number of unmatched sequence items above which pairing is positional.
pub const DEFAULT_MAX_PAIRING_LEN: usize = 512;

pub use crate::matching::DEFAULT_EXHAUSTIVE_LIMIT;

// ============================================================================
// Tests
// ============================================================================
