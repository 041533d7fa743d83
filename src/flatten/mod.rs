//! Flattening nested records into leaf maps.
//!
//! [`flatten`] walks a record and produces one entry per leaf. Empty
//! mappings and empty sequences become a leaf with value `None` at their own
//! path, so the container kind is not recoverable from the flat form.
//!
//! [`resolve_leaves`] does the same for a subtree that a diff report points
//! at, anchoring every resulting path at the subtree's location in the
//! original record.
//!
//! ```
//! use record_diff::flatten::flatten;
//! use record_diff::model::Path;
//! use serde_json::json;
//!
//! let flat = flatten(&json!({"a": {"b": 1}, "c": [true], "x": {}}));
//! assert_eq!(flat.get(&Path::root().key("a").key("b")), Some(&Some(json!(1))));
//! assert_eq!(flat.get(&Path::root().key("c").index(0)), Some(&Some(json!(true))));
//! assert_eq!(flat.get(&Path::root().key("x")), Some(&None));
//! ```

use crate::model::{FlatRecord, Path, PathSegment, Side};
use serde_json::Value;

/// Flatten a record into a map from leaf path to leaf value.
///
/// Mapping keys are visited in the record's own key order, sequences by
/// index, so the same input always yields the same map. A scalar at the
/// root yields a single entry at the empty path; so does an empty container.
#[must_use]
pub fn flatten(structure: &Value) -> FlatRecord {
    let mut out = FlatRecord::new();
    let mut path = Path::root();
    flatten_into(structure, &mut path, &mut out);
    out
}

fn flatten_into(value: &Value, path: &mut Path, out: &mut FlatRecord) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                path.push(PathSegment::Key(key.clone()));
                flatten_into(child, path, out);
                path.pop();
            }
        }
        Value::Array(items) if !items.is_empty() => {
            for (index, child) in items.iter().enumerate() {
                path.push(PathSegment::Index(index));
                flatten_into(child, path, out);
                path.pop();
            }
        }
        Value::Object(_) | Value::Array(_) => {
            out.insert(path.clone(), None);
        }
        scalar => {
            out.insert(path.clone(), Some(scalar.clone()));
        }
    }
}

/// Leaf paths and values underneath one side of a diff entry.
///
/// `prefix` is the path at which the diff report located `value`. Mappings
/// and sequences are flattened and re-anchored at `prefix`; a scalar maps to
/// itself at `prefix`; the not-present side maps to `None` at `prefix`.
#[must_use]
pub fn resolve_leaves(value: &Side, prefix: &Path) -> FlatRecord {
    let mut out = FlatRecord::new();
    match value {
        Side::NotPresent => {
            out.insert(prefix.clone(), None);
        }
        Side::Present(v) => {
            let mut path = prefix.clone();
            flatten_into(v, &mut path, &mut out);
        }
    }
    out
}

/// Number of entries [`flatten`] would produce, without building the map.
#[must_use]
pub fn leaf_count(value: &Value) -> usize {
    match value {
        Value::Object(map) if !map.is_empty() => map.values().map(leaf_count).sum(),
        Value::Array(items) if !items.is_empty() => items.iter().map(leaf_count).sum(),
        _ => 1,
    }
}
