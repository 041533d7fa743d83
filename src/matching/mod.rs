//! Best-match assignment between two index lists.
//!
//! Given `indices1` (every element must be placed), `indices2` (candidate
//! slots, possibly padded with `None` placeholders meaning "no counterpart")
//! and a [`DistanceMatrix`], find the assignment of every element of
//! `indices1` to a distinct slot of `indices2` with minimum total distance.
//! Pairing with a placeholder costs nothing.
//!
//! Two solvers share this contract:
//!
//! - [`best_match`]: Kuhn-Munkres (Hungarian) algorithm, polynomial time.
//! - [`best_match_exhaustive`]: brute-force search over every ordered
//!   selection of slots. Factorial time; kept as the reference oracle for
//!   small inputs (`exhaustive-match` feature).
//!
//! Both minimize total cost without regard to whether slots are real, so a
//! zero-cost placeholder wins over any positive-cost real match.
//!
//! # Example
//!
//! ```
//! use record_diff::matching::{best_match, DistanceMatrix};
//!
//! let distances = DistanceMatrix::from_rows(vec![vec![1.0, 5.0], vec![5.0, 1.0]]).unwrap();
//! let assignment = best_match(&[0, 1], &[Some(0), Some(1)], &distances).unwrap();
//!
//! assert_eq!(assignment.get(0), Some(Some(0)));
//! assert_eq!(assignment.get(1), Some(Some(1)));
//! assert_eq!(assignment.total_cost, 2.0);
//! ```

#[cfg(feature = "exhaustive-match")]
mod exhaustive;
mod hungarian;
mod matrix;

#[cfg(feature = "exhaustive-match")]
pub use exhaustive::best_match_exhaustive;
pub use hungarian::best_match;
pub use matrix::{DistanceMatrix, MAX_MATRIX_CELLS};

use crate::error::{MatchingErrorKind, RecordDiffError, Result};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Default upper bound on `indices2` length for the exhaustive solver.
pub const DEFAULT_EXHAUSTIVE_LIMIT: usize = 8;

/// Result of a best-match search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchAssignment {
    /// Every element of `indices1`, in input order, with its chosen slot
    /// (`None` when placed on a placeholder).
    pub pairs: IndexMap<usize, Option<usize>>,
    /// Sum of distances over real pairs.
    pub total_cost: f64,
}

impl MatchAssignment {
    /// Slot chosen for `index1`; `None` if `index1` was not part of the input.
    #[must_use]
    pub fn get(&self, index1: usize) -> Option<Option<usize>> {
        self.pairs.get(&index1).copied()
    }

    /// Pairs whose slot is a real index.
    pub fn matched(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pairs
            .iter()
            .filter_map(|(&i1, &i2)| i2.map(|i2| (i1, i2)))
    }

    /// Elements of `indices1` left without a counterpart.
    pub fn unmatched(&self) -> impl Iterator<Item = usize> + '_ {
        self.pairs
            .iter()
            .filter(|(_, i2)| i2.is_none())
            .map(|(&i1, _)| i1)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Which solver to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum MatchStrategy {
    /// Kuhn-Munkres, polynomial time
    #[default]
    Hungarian,
    /// Permutation search, factorial time (requires `exhaustive-match`)
    Exhaustive,
}

impl std::fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hungarian => write!(f, "hungarian"),
            Self::Exhaustive => write!(f, "exhaustive"),
        }
    }
}

impl std::str::FromStr for MatchStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hungarian" | "kuhn-munkres" => Ok(Self::Hungarian),
            "exhaustive" | "brute-force" => Ok(Self::Exhaustive),
            other => Err(format!(
                "unknown match strategy '{other}' (expected hungarian or exhaustive)"
            )),
        }
    }
}

/// Run the solver selected by `strategy`.
///
/// The exhaustive solver refuses inputs whose `indices2` is longer than
/// `exhaustive_limit`.
pub fn best_match_with(
    strategy: MatchStrategy,
    exhaustive_limit: usize,
    indices1: &[usize],
    indices2: &[Option<usize>],
    distances: &DistanceMatrix,
) -> Result<MatchAssignment> {
    match strategy {
        MatchStrategy::Hungarian => best_match(indices1, indices2, distances),
        MatchStrategy::Exhaustive => {
            if indices2.len() > exhaustive_limit {
                return Err(RecordDiffError::matching(
                    "exhaustive best match",
                    MatchingErrorKind::TooLarge {
                        size: indices2.len(),
                        limit: exhaustive_limit,
                    },
                ));
            }
            run_exhaustive(indices1, indices2, distances)
        }
    }
}

#[cfg(feature = "exhaustive-match")]
fn run_exhaustive(
    indices1: &[usize],
    indices2: &[Option<usize>],
    distances: &DistanceMatrix,
) -> Result<MatchAssignment> {
    best_match_exhaustive(indices1, indices2, distances)
}

#[cfg(not(feature = "exhaustive-match"))]
fn run_exhaustive(
    _indices1: &[usize],
    _indices2: &[Option<usize>],
    _distances: &DistanceMatrix,
) -> Result<MatchAssignment> {
    Err(RecordDiffError::config(
        "exhaustive matching requires the 'exhaustive-match' feature",
    ))
}

/// Check solver preconditions shared by both strategies.
///
/// Every `(i1, i2)` pair with a real `i2` can appear in some candidate
/// assignment, so all of them must be present in the matrix.
fn validate_inputs(
    indices1: &[usize],
    indices2: &[Option<usize>],
    distances: &DistanceMatrix,
) -> Result<()> {
    if indices2.len() < indices1.len() {
        return Err(RecordDiffError::matching(
            "validating best-match inputs",
            MatchingErrorKind::InsufficientCandidates {
                needed: indices1.len(),
                available: indices2.len(),
            },
        ));
    }

    let mut seen = HashSet::with_capacity(indices1.len());
    for &i1 in indices1 {
        if !seen.insert(i1) {
            return Err(RecordDiffError::matching(
                "validating indices1",
                MatchingErrorKind::DuplicateIndex(i1),
            ));
        }
    }

    let mut seen = HashSet::with_capacity(indices2.len());
    for &i2 in indices2.iter().flatten() {
        if !seen.insert(i2) {
            return Err(RecordDiffError::matching(
                "validating indices2",
                MatchingErrorKind::DuplicateIndex(i2),
            ));
        }
    }

    if !indices1.is_empty() {
        for &i1 in indices1 {
            for &i2 in indices2.iter().flatten() {
                distances.require(i1, i2)?;
            }
        }
    }

    Ok(())
}

/// Total distance of an assignment given as one slot position per `indices1` element.
fn assignment_cost(
    indices1: &[usize],
    indices2: &[Option<usize>],
    slots: &[usize],
    distances: &DistanceMatrix,
) -> Result<f64> {
    let mut total = 0.0;
    for (&i1, &slot) in indices1.iter().zip(slots) {
        if let Some(i2) = indices2[slot] {
            total += distances.require(i1, i2)?;
        }
    }
    Ok(total)
}

fn build_assignment(
    indices1: &[usize],
    indices2: &[Option<usize>],
    slots: &[usize],
    total_cost: f64,
) -> MatchAssignment {
    let pairs = indices1
        .iter()
        .zip(slots)
        .map(|(&i1, &slot)| (i1, indices2[slot]))
        .collect();
    MatchAssignment { pairs, total_cost }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(rows: Vec<Vec<f64>>) -> DistanceMatrix {
        DistanceMatrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_validate_rejects_short_candidate_list() {
        let d = square(vec![vec![1.0], vec![1.0]]);
        let err = best_match(&[0, 1], &[Some(0)], &d).unwrap_err();
        assert!(matches!(
            err,
            RecordDiffError::Matching {
                source: MatchingErrorKind::InsufficientCandidates { needed: 2, available: 1 },
                ..
            }
        ));
    }

    #[test]
    fn test_validate_rejects_missing_entry() {
        let d = DistanceMatrix::from_entries([((0, 0), 1.0)]).unwrap();
        let err = best_match(&[0], &[Some(0), Some(1)], &d).unwrap_err();
        assert!(matches!(
            err,
            RecordDiffError::Matching {
                source: MatchingErrorKind::MissingDistance { row: 0, col: 1 },
                ..
            }
        ));
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let d = square(vec![vec![1.0, 1.0], vec![1.0, 1.0]]);
        assert!(best_match(&[0, 0], &[Some(0), Some(1)], &d).is_err());
        assert!(best_match(&[0, 1], &[Some(1), Some(1)], &d).is_err());
        assert!(best_match(&[0], &[None, None], &d).is_ok());
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!("hungarian".parse::<MatchStrategy>(), Ok(MatchStrategy::Hungarian));
        assert_eq!("Exhaustive".parse::<MatchStrategy>(), Ok(MatchStrategy::Exhaustive));
        assert!("greedy".parse::<MatchStrategy>().is_err());
    }

    #[test]
    fn test_exhaustive_limit_is_enforced() {
        let d = DistanceMatrix::from_fn(1, 10, |_, c| c as f64).unwrap();
        let indices2: Vec<_> = (0..10).map(Some).collect();
        let err = best_match_with(MatchStrategy::Exhaustive, 4, &[0], &indices2, &d).unwrap_err();
        assert!(matches!(
            err,
            RecordDiffError::Matching {
                source: MatchingErrorKind::TooLarge { size: 10, limit: 4 },
                ..
            }
        ));
        let ok = best_match_with(MatchStrategy::Hungarian, 4, &[0], &indices2, &d).unwrap();
        assert_eq!(ok.get(0), Some(Some(0)));
    }

    #[test]
    fn test_assignment_accessors() {
        let d = square(vec![vec![2.0, 0.5], vec![0.5, 2.0], vec![9.0, 9.0]]);
        let a = best_match(&[0, 1, 2], &[Some(0), Some(1), None], &d).unwrap();
        assert_eq!(a.len(), 3);
        assert_eq!(a.matched().collect::<Vec<_>>(), vec![(0, 1), (1, 0)]);
        assert_eq!(a.unmatched().collect::<Vec<_>>(), vec![2]);
        assert!((a.total_cost - 1.0).abs() < 1e-9);
    }
}
