//! Kuhn-Munkres best match.

use super::{assignment_cost, build_assignment, validate_inputs, DistanceMatrix, MatchAssignment};
use crate::error::{MatchingErrorKind, RecordDiffError, Result};
use pathfinding::kuhn_munkres::kuhn_munkres_min;
use pathfinding::matrix::Matrix;

/// Minimum-cost assignment of `indices1` into the slots of `indices2`.
///
/// Builds an `indices1.len()` x `indices2.len()` integer cost matrix
/// (placeholder columns cost 0) and solves it with the Hungarian algorithm.
/// Distances are mapped onto integers relative to the largest distance the
/// problem needs, so the solver sees them at close to full `f64` precision
/// whatever their magnitude. Among equal totals the choice is whatever the
/// solver settles on, which need not be the one
/// [`best_match_exhaustive`](super::best_match_exhaustive) reports; the
/// total cost always agrees.
pub fn best_match(
    indices1: &[usize],
    indices2: &[Option<usize>],
    distances: &DistanceMatrix,
) -> Result<MatchAssignment> {
    validate_inputs(indices1, indices2, distances)?;

    if indices1.is_empty() {
        return Ok(build_assignment(indices1, indices2, &[], 0.0));
    }

    let rows = indices1.len();
    let columns = indices2.len();

    let mut needed = Vec::with_capacity(rows * columns);
    for &i1 in indices1 {
        for slot in indices2 {
            needed.push(match slot {
                Some(i2) => distances.require(i1, *i2)?,
                None => 0.0,
            });
        }
    }
    let weights = scale_to_integers(&needed, rows);

    let matrix = Matrix::from_vec(rows, columns, weights).map_err(|e| {
        RecordDiffError::matching(
            "building Kuhn-Munkres cost matrix",
            MatchingErrorKind::MalformedMatrix(format!("{e:?}")),
        )
    })?;

    let (_, slots) = kuhn_munkres_min(&matrix);
    if slots.len() != rows {
        return Err(RecordDiffError::matching(
            "running Kuhn-Munkres",
            MatchingErrorKind::NoAssignment,
        ));
    }

    let total_cost = assignment_cost(indices1, indices2, &slots, distances)?;
    tracing::trace!(rows, columns, total_cost, "kuhn-munkres assignment");
    Ok(build_assignment(indices1, indices2, &slots, total_cost))
}

/// Map non-negative distances onto `0..=budget`, where `budget` keeps the
/// solver's running sums over `rows` assignments well inside `i64`.
///
/// The largest distance maps to `budget` and everything else proportionally,
/// so relative differences survive down to about 2^-53 of the largest cell.
fn scale_to_integers(costs: &[f64], rows: usize) -> Vec<i64> {
    let budget = (i64::MAX / 4) / (rows as i64 + 1);
    let largest = costs.iter().copied().fold(0.0_f64, f64::max);
    if largest == 0.0 {
        return vec![0; costs.len()];
    }
    costs
        .iter()
        .map(|&cost| {
            // cost / largest is in [0, 1], so this never leaves 0..=budget.
            #[allow(clippy::cast_possible_truncation)]
            let scaled = ((cost / largest) * budget as f64).round() as i64;
            scaled.min(budget)
        })
        .collect()
}
