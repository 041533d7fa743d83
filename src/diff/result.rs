//! Classified diff output.

use crate::model::Path;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Diff entries sorted into added, removed and altered paths, at both entry
/// and leaf granularity.
///
/// Lists keep the order in which entries appeared in the report and may hold
/// duplicates; see [`Classification::deduplicated`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Overall dissimilarity reported by the differ, passed through unchanged
    pub deep_distance: f64,
    /// Entry paths (in B) present only in B
    pub paths_added: Vec<Path>,
    /// Entry paths (in A) present only in A
    pub paths_removed: Vec<Path>,
    /// Entry paths in A of entries present on both sides
    pub paths_altered_1: Vec<Path>,
    /// Entry paths in B of entries present on both sides
    pub paths_altered_2: Vec<Path>,
    /// Leaf paths under added entries
    pub leaf_paths_added: Vec<Path>,
    /// Leaf paths under removed entries
    pub leaf_paths_removed: Vec<Path>,
    /// Leaf paths in A under altered entries
    pub leaf_paths_altered_1: Vec<Path>,
    /// Leaf paths in B under altered entries
    pub leaf_paths_altered_2: Vec<Path>,
}

impl Classification {
    /// True when no entry was classified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths_added.is_empty() && self.paths_removed.is_empty() && self.paths_altered_1.is_empty()
    }

    /// Number of classified entries.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.paths_added.len() + self.paths_removed.len() + self.paths_altered_1.len()
    }

    /// Copy with repeated paths removed from every list, keeping the first
    /// occurrence.
    ///
    /// `paths_altered_1` and `paths_altered_2` stay index-aligned: an altered
    /// entry is dropped only when its `(path1, path2)` pair was already seen.
    /// The leaf lists carry no pairing and are deduplicated one by one.
    #[must_use]
    pub fn deduplicated(&self) -> Self {
        let (paths_altered_1, paths_altered_2) =
            dedup_pairs(&self.paths_altered_1, &self.paths_altered_2);
        Self {
            deep_distance: self.deep_distance,
            paths_added: dedup(&self.paths_added),
            paths_removed: dedup(&self.paths_removed),
            paths_altered_1,
            paths_altered_2,
            leaf_paths_added: dedup(&self.leaf_paths_added),
            leaf_paths_removed: dedup(&self.leaf_paths_removed),
            leaf_paths_altered_1: dedup(&self.leaf_paths_altered_1),
            leaf_paths_altered_2: dedup(&self.leaf_paths_altered_2),
        }
    }

    #[must_use]
    pub fn summary(&self) -> ClassificationSummary {
        ClassificationSummary {
            deep_distance: self.deep_distance,
            added: self.paths_added.len(),
            removed: self.paths_removed.len(),
            altered: self.paths_altered_1.len(),
            leaves_added: self.leaf_paths_added.len(),
            leaves_removed: self.leaf_paths_removed.len(),
            leaves_altered_1: self.leaf_paths_altered_1.len(),
            leaves_altered_2: self.leaf_paths_altered_2.len(),
        }
    }
}

fn dedup(paths: &[Path]) -> Vec<Path> {
    let mut seen = HashSet::with_capacity(paths.len());
    paths
        .iter()
        .filter(|p| seen.insert(*p))
        .cloned()
        .collect()
}

fn dedup_pairs(first: &[Path], second: &[Path]) -> (Vec<Path>, Vec<Path>) {
    let mut seen = HashSet::with_capacity(first.len());
    first
        .iter()
        .zip(second)
        .filter(|&pair| seen.insert(pair))
        .map(|(a, b)| (a.clone(), b.clone()))
        .unzip()
}

/// Counts over a [`Classification`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassificationSummary {
    pub deep_distance: f64,
    pub added: usize,
    pub removed: usize,
    pub altered: usize,
    pub leaves_added: usize,
    pub leaves_removed: usize,
    pub leaves_altered_1: usize,
    pub leaves_altered_2: usize,
}

impl ClassificationSummary {
    #[must_use]
    pub const fn has_changes(&self) -> bool {
        self.added + self.removed + self.altered > 0
    }
}
