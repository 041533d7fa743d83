//! Brute-force best match over every ordered selection of slots.

use super::{build_assignment, validate_inputs, DistanceMatrix, MatchAssignment};
use crate::error::{MatchingErrorKind, RecordDiffError, Result};

/// Minimum-cost assignment found by enumerating permutations.
///
/// Candidate assignments are visited in the order of
/// `permutations(indices2, len(indices1))`: slot positions chosen
/// lexicographically. Each candidate's cost is the sum of
/// `distances[(i1, i2)]` over real slots, accumulated in `indices1` order; a
/// candidate replaces the incumbent only if strictly cheaper, so ties go to
/// the first one enumerated. Partial selections already at or above the
/// incumbent are not extended, which cannot change the outcome because
/// distances are non-negative.
///
/// Runs in `O(m! / (m - n)!)` for `n = indices1.len()`, `m =
/// indices2.len()`. Intended for a handful of items.
pub fn best_match_exhaustive(
    indices1: &[usize],
    indices2: &[Option<usize>],
    distances: &DistanceMatrix,
) -> Result<MatchAssignment> {
    validate_inputs(indices1, indices2, distances)?;

    let mut search = Search {
        indices1,
        indices2,
        distances,
        used: vec![false; indices2.len()],
        current: Vec::with_capacity(indices1.len()),
        best: None,
        visited: 0,
    };
    search.extend(0.0)?;

    tracing::trace!(
        n = indices1.len(),
        m = indices2.len(),
        visited = search.visited,
        "exhaustive assignment search finished"
    );

    match search.best {
        Some((cost, slots)) => Ok(build_assignment(indices1, indices2, &slots, cost)),
        None => Err(RecordDiffError::matching(
            "exhaustive best match",
            MatchingErrorKind::NoAssignment,
        )),
    }
}

struct Search<'a> {
    indices1: &'a [usize],
    indices2: &'a [Option<usize>],
    distances: &'a DistanceMatrix,
    used: Vec<bool>,
    current: Vec<usize>,
    best: Option<(f64, Vec<usize>)>,
    visited: u64,
}

impl Search<'_> {
    fn extend(&mut self, cost_so_far: f64) -> Result<()> {
        if let Some((best_cost, _)) = &self.best {
            if cost_so_far >= *best_cost {
                return Ok(());
            }
        }

        let depth = self.current.len();
        if depth == self.indices1.len() {
            self.visited += 1;
            self.best = Some((cost_so_far, self.current.clone()));
            return Ok(());
        }

        let i1 = self.indices1[depth];
        for slot in 0..self.indices2.len() {
            if self.used[slot] {
                continue;
            }
            let step = match self.indices2[slot] {
                Some(i2) => self.distances.require(i1, i2)?,
                None => 0.0,
            };
            self.used[slot] = true;
            self.current.push(slot);
            self.extend(cost_so_far + step)?;
            self.current.pop();
            self.used[slot] = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagonal_is_optimal() {
        let d = DistanceMatrix::from_rows(vec![vec![1.0, 5.0], vec![5.0, 1.0]]).unwrap();
        let a = best_match_exhaustive(&[0, 1], &[Some(0), Some(1)], &d).unwrap();
        assert_eq!(a.get(0), Some(Some(0)));
        assert_eq!(a.get(1), Some(Some(1)));
        assert_eq!(a.total_cost, 2.0);
    }

    #[test]
    fn test_placeholder_wins_over_positive_cost() {
        let d = DistanceMatrix::from_entries([((0, 1), 3.0)]).unwrap();
        let a = best_match_exhaustive(&[0], &[None, Some(1)], &d).unwrap();
        assert_eq!(a.get(0), Some(None));
        assert_eq!(a.total_cost, 0.0);
    }

    #[test]
    fn test_tie_goes_to_first_enumerated() {
        // Zero-cost real match ties with the placeholder; the placeholder
        // comes first in indices2 so it is enumerated first.
        let d = DistanceMatrix::from_entries([((0, 1), 0.0)]).unwrap();
        let a = best_match_exhaustive(&[0], &[None, Some(1)], &d).unwrap();
        assert_eq!(a.get(0), Some(None));

        let a = best_match_exhaustive(&[0], &[Some(1), None], &d).unwrap();
        assert_eq!(a.get(0), Some(Some(1)));

        let d = DistanceMatrix::from_rows(vec![vec![1.0, 1.0], vec![1.0, 1.0]]).unwrap();
        let a = best_match_exhaustive(&[0, 1], &[Some(0), Some(1)], &d).unwrap();
        assert_eq!(a.get(0), Some(Some(0)));
        assert_eq!(a.get(1), Some(Some(1)));
    }

    #[test]
    fn test_matches_real_slots_when_placeholders_run_out() {
        let d = DistanceMatrix::from_rows(vec![vec![4.0, 2.0], vec![3.0, 6.0]]).unwrap();
        let a = best_match_exhaustive(&[0, 1], &[None, Some(0), Some(1)], &d).unwrap();
        // One element takes the placeholder, the other its cheapest real slot.
        assert_eq!(a.total_cost, 2.0);
        assert_eq!(a.get(0), Some(Some(1)));
        assert_eq!(a.get(1), Some(None));
    }

    #[test]
    fn test_empty_input_yields_empty_assignment() {
        let d = DistanceMatrix::from_rows(Vec::new()).unwrap();
        let a = best_match_exhaustive(&[], &[], &d).unwrap();
        assert!(a.is_empty());
    }
}
