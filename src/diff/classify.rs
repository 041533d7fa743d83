//! Sort diff entries into added, removed and altered paths.

use super::{Classification, DiffReport};
use crate::error::{RecordDiffError, Result};
use crate::flatten::resolve_leaves;
use crate::model::{Path, Side};

/// Classify every entry of `report` by which sides are present.
///
/// - only B present: added; the entry's `path2` and the leaves of its B value
/// - only A present: removed; `path1` and the leaves of its A value
/// - both present: altered; `path1`/`path2` and the leaves of each side
///
/// Classification looks at side presence only, never at the entry's
/// [`ReportKey`](super::ReportKey). Altered leaves are every leaf under each
/// side's value, not only the leaves that differ; when a whole subtree is
/// replaced all of its leaves are reported on both sides. Lists are
/// concatenated in entry order without deduplication.
///
/// # Errors
///
/// An entry with neither side present is an invariant violation and fails
/// the whole classification.
pub fn classify(report: &DiffReport) -> Result<Classification> {
    let mut out = Classification {
        deep_distance: report.deep_distance,
        ..Classification::default()
    };

    for (index, entry) in report.entries.iter().enumerate() {
        match (entry.t1.is_present(), entry.t2.is_present()) {
            (false, true) => {
                out.paths_added.push(entry.path2.clone());
                out.leaf_paths_added.extend(leaves(&entry.t2, &entry.path2));
            }
            (true, false) => {
                out.paths_removed.push(entry.path1.clone());
                out.leaf_paths_removed.extend(leaves(&entry.t1, &entry.path1));
            }
            (true, true) => {
                out.paths_altered_1.push(entry.path1.clone());
                out.paths_altered_2.push(entry.path2.clone());
                out.leaf_paths_altered_1.extend(leaves(&entry.t1, &entry.path1));
                out.leaf_paths_altered_2.extend(leaves(&entry.t2, &entry.path2));
            }
            (false, false) => {
                return Err(RecordDiffError::invalid_state(
                    format!("classifying diff entry {index} ({})", entry.kind),
                    format!(
                        "neither side present at {} / {}",
                        entry.path1, entry.path2
                    ),
                ));
            }
        }
    }

    tracing::debug!(
        entries = report.entries.len(),
        added = out.paths_added.len(),
        removed = out.paths_removed.len(),
        altered = out.paths_altered_1.len(),
        "classified diff report"
    );
    Ok(out)
}

fn leaves(side: &Side, path: &Path) -> impl Iterator<Item = Path> {
    resolve_leaves(side, path).into_keys()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{DiffEntry, ReportKey};
    use serde_json::json;

    fn entry(t1: Side, t2: Side, path1: Path, path2: Path) -> DiffEntry {
        DiffEntry {
            kind: ReportKey::ValuesChanged,
            t1,
            t2,
            path1,
            path2,
        }
    }

    #[test]
    fn test_scalar_change_is_altered() {
        let ab = Path::root().key("a").key("b");
        let report = DiffReport {
            entries: vec![entry(json!(1).into(), json!(2).into(), ab.clone(), ab.clone())],
            deep_distance: 0.2,
        };
        let c = classify(&report).unwrap();
        assert_eq!(c.paths_altered_1, vec![ab.clone()]);
        assert_eq!(c.paths_altered_2, vec![ab.clone()]);
        assert_eq!(c.leaf_paths_altered_1, vec![ab.clone()]);
        assert_eq!(c.leaf_paths_altered_2, vec![ab]);
        assert!(c.paths_added.is_empty());
        assert_eq!(c.deep_distance, 0.2);
    }

    #[test]
    fn test_added_subtree_expands_to_leaves() {
        let x = Path::root().key("x");
        let report = DiffReport {
            entries: vec![entry(
                Side::NotPresent,
                json!({"y": [1, 2]}).into(),
                x.clone(),
                x.clone(),
            )],
            deep_distance: 1.0,
        };
        let c = classify(&report).unwrap();
        assert_eq!(c.paths_added, vec![x.clone()]);
        assert_eq!(
            c.leaf_paths_added,
            vec![x.clone().key("y").index(0), x.key("y").index(1)]
        );
        assert!(c.leaf_paths_removed.is_empty());
    }

    #[test]
    fn test_removed_empty_container_yields_its_own_path() {
        let z = Path::root().key("z");
        let report = DiffReport {
            entries: vec![entry(json!([]).into(), Side::NotPresent, z.clone(), z.clone())],
            deep_distance: 0.5,
        };
        let c = classify(&report).unwrap();
        assert_eq!(c.paths_removed, vec![z.clone()]);
        assert_eq!(c.leaf_paths_removed, vec![z]);
    }

    #[test]
    fn test_altered_uses_each_sides_own_path() {
        let p1 = Path::root().key("items").index(2).key("qty");
        let p2 = Path::root().key("items").index(0).key("qty");
        let report = DiffReport {
            entries: vec![entry(json!(1).into(), json!(3).into(), p1.clone(), p2.clone())],
            deep_distance: 0.1,
        };
        let c = classify(&report).unwrap();
        assert_eq!(c.leaf_paths_altered_1, vec![p1]);
        assert_eq!(c.leaf_paths_altered_2, vec![p2]);
    }

    #[test]
    fn test_altered_container_lists_all_leaves() {
        let p = Path::root().key("obj");
        let report = DiffReport {
            entries: vec![entry(
                json!({"a": 1, "b": 2}).into(),
                json!("flat").into(),
                p.clone(),
                p.clone(),
            )],
            deep_distance: 1.0,
        };
        let c = classify(&report).unwrap();
        assert_eq!(
            c.leaf_paths_altered_1,
            vec![p.clone().key("a"), p.clone().key("b")]
        );
        assert_eq!(c.leaf_paths_altered_2, vec![p]);
    }

    #[test]
    fn test_duplicates_are_preserved() {
        let p = Path::root().key("a");
        let report = DiffReport {
            entries: vec![
                entry(Side::NotPresent, json!(1).into(), p.clone(), p.clone()),
                entry(Side::NotPresent, json!(1).into(), p.clone(), p.clone()),
            ],
            deep_distance: 0.5,
        };
        let c = classify(&report).unwrap();
        assert_eq!(c.paths_added.len(), 2);
        assert_eq!(c.deduplicated().paths_added.len(), 1);
    }

    #[test]
    fn test_neither_side_present_is_invalid_state() {
        let report = DiffReport {
            entries: vec![entry(
                Side::NotPresent,
                Side::NotPresent,
                Path::root(),
                Path::root(),
            )],
            deep_distance: 0.0,
        };
        let err = classify(&report).unwrap_err();
        assert!(err.is_invalid_state());
    }

    #[test]
    fn test_empty_report() {
        let c = classify(&DiffReport::default()).unwrap();
        assert!(c.is_empty());
        assert_eq!(c.deep_distance, 0.0);
    }

    #[test]
    fn test_every_entry_lands_in_exactly_one_category() {
        let p = Path::root().key("k");
        let report = DiffReport {
            entries: vec![
                entry(Side::NotPresent, json!(1).into(), p.clone(), p.clone()),
                entry(json!(1).into(), Side::NotPresent, p.clone(), p.clone()),
                entry(json!(1).into(), json!(2).into(), p.clone(), p.clone()),
                entry(json!(null).into(), json!(2).into(), p.clone(), p.clone()),
            ],
            deep_distance: 0.9,
        };
        let c = classify(&report).unwrap();
        assert_eq!(c.entry_count(), report.len());
        assert_eq!(c.paths_altered_1.len(), 2);
    }
}
