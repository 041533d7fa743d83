//! Order-insensitive record diffing and classification.
//!
//! A [`TreeDiffer`] compares two records and reports each difference as a
//! [`DiffEntry`] carrying both sides' raw values and their paths. [`classify`]
//! then sorts those entries into added, removed and altered paths, at entry
//! and at leaf granularity. [`DiffEngine`] runs both steps.
//!
//! # Example
//!
//! ```
//! use record_diff::diff::DiffEngine;
//! use record_diff::model::Path;
//! use serde_json::json;
//!
//! let a = json!({"a": {"b": 1}, "c": [1, 2]});
//! let b = json!({"a": {"b": 2}, "c": [2, 1]});
//!
//! let result = DiffEngine::new().compare(&a, &b).unwrap();
//! let changed = Path::root().key("a").key("b");
//! assert_eq!(result.classification.leaf_paths_altered_1, vec![changed.clone()]);
//! assert_eq!(result.classification.leaf_paths_altered_2, vec![changed]);
//! assert!(result.classification.deep_distance > 0.0);
//! ```

mod classify;
mod engine;
mod report;
mod result;
mod traits;
mod unordered;

pub use classify::classify;
pub use engine::{DiffEngine, EngineOptions, RecordComparison};
pub use report::{ChangeCategory, DiffEntry, DiffReport, ReportKey};
pub use result::{Classification, ClassificationSummary};
pub use traits::{PrecomputedDiffer, TreeDiffer};
pub use unordered::{UnorderedDiffConfig, UnorderedDiffer};
