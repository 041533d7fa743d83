//! Raw diff reports produced by a [`TreeDiffer`](super::TreeDiffer).

use crate::flatten::leaf_count;
use crate::model::{Path, Side};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fine-grained tag of a reported difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKey {
    ValuesChanged,
    TypeChanges,
    DictionaryItemAdded,
    DictionaryItemRemoved,
    IterableItemAdded,
    IterableItemRemoved,
}

impl ReportKey {
    /// Collapse mapping/sequence variants into added, removed or changed.
    #[must_use]
    pub const fn category(self) -> ChangeCategory {
        match self {
            Self::ValuesChanged | Self::TypeChanges => ChangeCategory::Changed,
            Self::DictionaryItemAdded | Self::IterableItemAdded => ChangeCategory::Added,
            Self::DictionaryItemRemoved | Self::IterableItemRemoved => ChangeCategory::Removed,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ValuesChanged => "values_changed",
            Self::TypeChanges => "type_changes",
            Self::DictionaryItemAdded => "dictionary_item_added",
            Self::DictionaryItemRemoved => "dictionary_item_removed",
            Self::IterableItemAdded => "iterable_item_added",
            Self::IterableItemRemoved => "iterable_item_removed",
        }
    }
}

impl fmt::Display for ReportKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse category of a difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeCategory {
    Added,
    Removed,
    Changed,
}

/// One difference between record A and record B.
///
/// `path1` locates the entry in A and `path2` in B. With order-insensitive
/// sequence comparison the two may differ in their index segments, so they
/// must never be assumed equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffEntry {
    pub kind: ReportKey,
    pub t1: Side,
    pub t2: Side,
    pub path1: Path,
    pub path2: Path,
}

impl DiffEntry {
    #[must_use]
    pub fn added(kind: ReportKey, value: serde_json::Value, path1: Path, path2: Path) -> Self {
        Self {
            kind,
            t1: Side::NotPresent,
            t2: Side::Present(value),
            path1,
            path2,
        }
    }

    #[must_use]
    pub fn removed(kind: ReportKey, value: serde_json::Value, path1: Path, path2: Path) -> Self {
        Self {
            kind,
            t1: Side::Present(value),
            t2: Side::NotPresent,
            path1,
            path2,
        }
    }

    #[must_use]
    pub fn changed(
        kind: ReportKey,
        old: serde_json::Value,
        new: serde_json::Value,
        path1: Path,
        path2: Path,
    ) -> Self {
        Self {
            kind,
            t1: Side::Present(old),
            t2: Side::Present(new),
            path1,
            path2,
        }
    }

    /// Number of leaves on both sides covered by this entry.
    #[must_use]
    pub fn touched_leaves(&self) -> usize {
        [&self.t1, &self.t2]
            .into_iter()
            .filter_map(Side::value)
            .map(leaf_count)
            .sum()
    }
}

/// Everything a differ reports for one pair of records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiffReport {
    pub entries: Vec<DiffEntry>,
    /// Overall dissimilarity in `[0, 1]`; 0 means equal.
    #[serde(default)]
    pub deep_distance: f64,
}

impl DiffReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries whose tag falls into `category`.
    pub fn by_category(&self, category: ChangeCategory) -> impl Iterator<Item = &DiffEntry> {
        self.entries
            .iter()
            .filter(move |e| e.kind.category() == category)
    }
}
