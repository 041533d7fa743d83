//! Configuration module for record-diff.
//!
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets for common use cases
//! - YAML config file loading and discovery
//!
//! # Quick Start
//!
//! ```
//! use record_diff::config::{AppConfig, ConfigPreset, Validatable};
//!
//! let config = AppConfig::from_preset(ConfigPreset::CiCd);
//! assert!(config.behavior.fail_on_change);
//!
//! let config = AppConfig::builder().pair_cutoff(0.5).build();
//! assert!(config.is_valid());
//! ```
//!
//! # Configuration File
//!
//! Place a `.record-diff.yaml` file in your working directory or
//! `~/.config/record-diff/`:
//!
//! ```yaml
//! diff:
//!   pair_cutoff: 0.3
//!   deduplicate: true
//! output:
//!   format: json
//! behavior:
//!   fail_on_change: true
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    ConfigPreset, DEFAULT_EXHAUSTIVE_LIMIT, DEFAULT_MAX_PAIRING_LEN, DEFAULT_PAIR_CUTOFF,
};
pub use types::{
    AppConfig, AppConfigBuilder, BehaviorConfig, DiffConfig, DiffPaths, DifferConfig,
    MatchingConfig, OutputConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// Editors can use it to validate and complete `.record-diff.yaml` files.
pub fn generate_json_schema() -> serde_json::Result<String> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}
