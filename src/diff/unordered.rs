//! Order-insensitive tree differ.

use super::{DiffEntry, DiffReport, ReportKey, TreeDiffer};
use crate::error::Result;
use crate::flatten::leaf_count;
use crate::matching::{best_match, DistanceMatrix};
use crate::model::{values_equal, Path, ValueKind};
use crate::utils::value_hash;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Tuning for [`UnorderedDiffer`].
#[derive(Debug, Clone, PartialEq)]
pub struct UnorderedDiffConfig {
    /// Paired sequence items further apart than this are reported as one
    /// removal plus one addition instead of a nested change.
    pub pair_cutoff: f64,
    /// Above this many unmatched items per side, sequences are paired by
    /// position instead of by distance.
    pub max_pairing_len: usize,
}

impl Default for UnorderedDiffConfig {
    fn default() -> Self {
        Self {
            pair_cutoff: 0.3,
            max_pairing_len: 512,
        }
    }
}

/// Structural differ that ignores sequence order.
///
/// Mappings are compared key by key. Sequence items are first paired with
/// an equal item on the other side wherever one exists, so reordering alone
/// reports nothing. The remaining items are paired by minimum total
/// [`deep_distance`](DiffReport::deep_distance) and compared recursively;
/// pairs further apart than [`UnorderedDiffConfig::pair_cutoff`] and items
/// left over on the longer side are reported as removed or added.
///
/// `deep_distance` of the report is the share of leaves, over both records,
/// touched by some entry.
#[derive(Debug, Clone, Default)]
pub struct UnorderedDiffer {
    config: UnorderedDiffConfig,
}

impl UnorderedDiffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_config(config: UnorderedDiffConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &UnorderedDiffConfig {
        &self.config
    }

    fn compare(
        &self,
        a: &Value,
        b: &Value,
        path1: &mut Path,
        path2: &mut Path,
        out: &mut Vec<DiffEntry>,
    ) -> Result<()> {
        if values_equal(a, b) {
            return Ok(());
        }
        match (a, b) {
            (Value::Object(ma), Value::Object(mb)) => self.compare_objects(ma, mb, path1, path2, out),
            (Value::Array(xs), Value::Array(ys)) => self.compare_arrays(xs, ys, path1, path2, out),
            _ => {
                let kind = if ValueKind::of(a) == ValueKind::of(b) {
                    ReportKey::ValuesChanged
                } else {
                    ReportKey::TypeChanges
                };
                out.push(DiffEntry::changed(
                    kind,
                    a.clone(),
                    b.clone(),
                    path1.clone(),
                    path2.clone(),
                ));
                Ok(())
            }
        }
    }

    fn compare_objects(
        &self,
        ma: &Map<String, Value>,
        mb: &Map<String, Value>,
        path1: &mut Path,
        path2: &mut Path,
        out: &mut Vec<DiffEntry>,
    ) -> Result<()> {
        for (key, va) in ma {
            match mb.get(key) {
                Some(vb) => {
                    path1.push(key.as_str().into());
                    path2.push(key.as_str().into());
                    let result = self.compare(va, vb, path1, path2, out);
                    path1.pop();
                    path2.pop();
                    result?;
                }
                None => out.push(DiffEntry::removed(
                    ReportKey::DictionaryItemRemoved,
                    va.clone(),
                    path1.clone().key(key.as_str()),
                    path2.clone().key(key.as_str()),
                )),
            }
        }
        for (key, vb) in mb {
            if !ma.contains_key(key) {
                out.push(DiffEntry::added(
                    ReportKey::DictionaryItemAdded,
                    vb.clone(),
                    path1.clone().key(key.as_str()),
                    path2.clone().key(key.as_str()),
                ));
            }
        }
        Ok(())
    }

    fn compare_arrays(
        &self,
        xs: &[Value],
        ys: &[Value],
        path1: &mut Path,
        path2: &mut Path,
        out: &mut Vec<DiffEntry>,
    ) -> Result<()> {
        let (left, right) = exact_pairs(xs, ys);

        let pairs = if left.len().max(right.len()) > self.config.max_pairing_len {
            tracing::debug!(
                path = %path1,
                left = left.len(),
                right = right.len(),
                limit = self.config.max_pairing_len,
                "pairing sequence items by position"
            );
            left.iter().copied().zip(right.iter().copied()).collect()
        } else {
            self.pair_by_distance(xs, ys, &left, &right)?
        };

        let mut paired_x = vec![false; xs.len()];
        let mut paired_y = vec![false; ys.len()];
        for &(i, j) in &pairs {
            paired_x[i] = true;
            paired_y[j] = true;
            path1.push(i.into());
            path2.push(j.into());
            let result = self.compare(&xs[i], &ys[j], path1, path2, out);
            path1.pop();
            path2.pop();
            result?;
        }

        for &i in left.iter().filter(|&&i| !paired_x[i]) {
            out.push(DiffEntry::removed(
                ReportKey::IterableItemRemoved,
                xs[i].clone(),
                path1.clone().index(i),
                path2.clone().index(i),
            ));
        }
        for &j in right.iter().filter(|&&j| !paired_y[j]) {
            out.push(DiffEntry::added(
                ReportKey::IterableItemAdded,
                ys[j].clone(),
                path1.clone().index(j),
                path2.clone().index(j),
            ));
        }
        Ok(())
    }

    /// Pair leftover items so the shorter side is fully placed at minimum
    /// total distance, then drop pairs beyond the cutoff.
    fn pair_by_distance(
        &self,
        xs: &[Value],
        ys: &[Value],
        left: &[usize],
        right: &[usize],
    ) -> Result<Vec<(usize, usize)>> {
        if left.is_empty() || right.is_empty() {
            return Ok(Vec::new());
        }

        let mut rows = Vec::with_capacity(left.len());
        for &i in left {
            let mut row = Vec::with_capacity(right.len());
            for &j in right {
                row.push(self.pair_distance(&xs[i], &ys[j])?);
            }
            rows.push(row);
        }

        // The solver needs at least as many slots as elements.
        let transposed = left.len() > right.len();
        let distances = if transposed {
            let columns: Vec<Vec<f64>> = (0..right.len())
                .map(|c| rows.iter().map(|row| row[c]).collect())
                .collect();
            DistanceMatrix::from_rows(columns)?
        } else {
            DistanceMatrix::from_rows(rows)?
        };
        let (elements, slots) = if transposed {
            (right.len(), left.len())
        } else {
            (left.len(), right.len())
        };

        let indices1: Vec<usize> = (0..elements).collect();
        let indices2: Vec<Option<usize>> = (0..slots).map(Some).collect();
        let assignment = best_match(&indices1, &indices2, &distances)?;

        let mut pairs = Vec::with_capacity(elements);
        for (e, s) in assignment.matched() {
            let (r, c) = if transposed { (s, e) } else { (e, s) };
            let distance = distances.require(e, s)?;
            if distance <= self.config.pair_cutoff {
                pairs.push((left[r], right[c]));
            }
        }
        pairs.sort_unstable();
        Ok(pairs)
    }

    fn pair_distance(&self, a: &Value, b: &Value) -> Result<f64> {
        if values_equal(a, b) {
            return Ok(0.0);
        }
        let kind = ValueKind::of(a);
        if kind.is_container() && kind == ValueKind::of(b) {
            return Ok(self.diff(a, b)?.deep_distance);
        }
        Ok(1.0)
    }
}

impl TreeDiffer for UnorderedDiffer {
    fn diff(&self, a: &Value, b: &Value) -> Result<DiffReport> {
        let mut entries = Vec::new();
        self.compare(a, b, &mut Path::root(), &mut Path::root(), &mut entries)?;

        let total = leaf_count(a) + leaf_count(b);
        let touched: usize = entries.iter().map(DiffEntry::touched_leaves).sum();
        let deep_distance = if entries.is_empty() || total == 0 {
            0.0
        } else {
            (touched as f64 / total as f64).min(1.0)
        };

        Ok(DiffReport {
            entries,
            deep_distance,
        })
    }

    fn name(&self) -> &str {
        "unordered"
    }
}

/// Pair every item with an equal, not yet paired item on the other side.
///
/// Returns the positions left unpaired on each side, in ascending order.
fn exact_pairs(xs: &[Value], ys: &[Value]) -> (Vec<usize>, Vec<usize>) {
    let mut buckets: HashMap<u64, Vec<usize>> = HashMap::with_capacity(ys.len());
    for (j, y) in ys.iter().enumerate() {
        buckets.entry(value_hash(y)).or_default().push(j);
    }

    let mut taken = vec![false; ys.len()];
    let mut left = Vec::new();
    for (i, x) in xs.iter().enumerate() {
        let hit = buckets.get(&value_hash(x)).and_then(|candidates| {
            candidates
                .iter()
                .copied()
                .find(|&j| !taken[j] && values_equal(x, &ys[j]))
        });
        match hit {
            Some(j) => taken[j] = true,
            None => left.push(i),
        }
    }

    let right = (0..ys.len()).filter(|&j| !taken[j]).collect();
    (left, right)
}
