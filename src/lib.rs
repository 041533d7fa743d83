//! **Order-insensitive structural diff and leaf-level auditing for nested records.**
//!
//! `record-diff` compares two nested records (JSON or YAML documents, or any
//! [`serde_json::Value`]) while ignoring the order of sequence items, and
//! reports every difference down to the individual leaf values involved.
//! It powers both a command-line interface and a Rust library.
//!
//! ## Core Concepts & Modules
//!
//! - **[`flatten`]**: Turns a nested record into a flat, ordered map from
//!   [`Path`] to leaf value, and resolves the leaves under any diff entry.
//! - **[`diff`]**: Home of the [`DiffEngine`]. A pluggable [`TreeDiffer`]
//!   produces a [`DiffReport`] of typed entries; [`classify`] sorts every
//!   entry into added, removed and altered paths plus the leaves under them.
//! - **[`matching`]**: Minimum-cost assignment between two index lists with
//!   optional placeholder slots, solved by [`best_match`] (Kuhn-Munkres) or
//!   brute force for small inputs.
//! - **[`reports`]**: Summary, JSON and path-listing output.
//! - **[`pipeline`]**: Load → diff → report stages shared by the CLI.
//!
//! ## Getting Started
//!
//! ```
//! use record_diff::{DiffEngine, Path};
//! use serde_json::json;
//!
//! let a = json!({"a": {"b": 1}, "c": [1, 2]});
//! let b = json!({"a": {"b": 2}, "c": [2, 1]});
//!
//! let result = DiffEngine::new().compare(&a, &b).unwrap();
//! let changed = Path::root().key("a").key("b");
//!
//! assert_eq!(result.classification.leaf_paths_altered_1, vec![changed.clone()]);
//! assert_eq!(result.classification.leaf_paths_altered_2, vec![changed]);
//! assert!(result.classification.deep_distance > 0.0);
//! ```
//!
//! ### Flattening a Record
//!
//! ```
//! use record_diff::flatten;
//! use serde_json::json;
//!
//! let flat = flatten(&json!({"x": [1, {"y": null}]}));
//! let paths: Vec<String> = flat.keys().map(ToString::to_string).collect();
//! assert_eq!(paths, ["root['x'][0]", "root['x'][1]['y']"]);
//! ```
//!
//! ## Feature Flags
//!
//! - `exhaustive-match` (default): the brute-force best-match solver.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::cast_precision_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod flatten;
pub mod matching;
pub mod model;
pub mod pipeline;
pub mod reports;
pub mod utils;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigPreset};
pub use config::{BehaviorConfig, DiffConfig, DifferConfig, MatchingConfig, OutputConfig};
pub use config::{ConfigError, Validatable};
pub use diff::{
    classify, Classification, ClassificationSummary, DiffEngine, DiffEntry, DiffReport,
    RecordComparison, ReportKey, TreeDiffer, UnorderedDiffConfig, UnorderedDiffer,
};
pub use error::{ErrorContext, OptionContext, RecordDiffError, Result};
pub use flatten::{flatten, leaf_count, resolve_leaves};
pub use matching::{best_match, best_match_with, DistanceMatrix, MatchAssignment, MatchStrategy};
pub use model::{FlatRecord, LeafValue, Path, PathSegment, Side};
pub use pipeline::{load_record, parse_record_str, RecordFormat};
pub use reports::{ReportFormat, ReportGenerator};
