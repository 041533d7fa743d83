//! Property-based tests for the best-match solvers.
//!
//! The exhaustive solver enumerates every candidate assignment, so on small
//! inputs it is the reference the Kuhn-Munkres solver is checked against.

#![cfg(feature = "exhaustive-match")]

use proptest::prelude::*;
use record_diff::matching::{best_match, best_match_exhaustive, DistanceMatrix};

/// `(rows, real slots, placeholders, distances)` with `rows <= slots + placeholders`.
fn arb_problem() -> impl Strategy<Value = (usize, usize, usize, Vec<Vec<f64>>)> {
    arb_scaled_problem().prop_map(|(problem, _)| problem)
}

/// Like [`arb_problem`], with every cell a multiple of `unit / 1000` for a
/// `unit` between 1 and 1e-12, returned alongside.
fn arb_scaled_problem() -> impl Strategy<Value = ((usize, usize, usize, Vec<Vec<f64>>), f64)> {
    (1usize..=4, 1usize..=4, 0usize..=2, 0i32..=12)
        .prop_filter("enough slots", |&(rows, real, holes, _)| rows <= real + holes)
        .prop_flat_map(|(rows, real, holes, exponent)| {
            let unit = 10f64.powi(-exponent);
            let cell = (0u32..1000).prop_map(move |n| f64::from(n) / 1000.0 * unit);
            let matrix = prop::collection::vec(prop::collection::vec(cell, real), rows);
            ((Just(rows), Just(real), Just(holes), matrix), Just(unit))
        })
}

fn slots(real: usize, holes: usize) -> Vec<Option<usize>> {
    (0..real).map(Some).chain(std::iter::repeat(None).take(holes)).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn solvers_agree_on_total_cost(((rows, real, holes, matrix), unit) in arb_scaled_problem()) {
        let distances = DistanceMatrix::from_rows(matrix).unwrap();
        let indices1: Vec<usize> = (0..rows).collect();
        let indices2 = slots(real, holes);

        let fast = best_match(&indices1, &indices2, &distances).unwrap();
        let exact = best_match_exhaustive(&indices1, &indices2, &distances).unwrap();

        // Distinct totals differ by at least unit / 1000.
        let tolerance = 1e-9 * exact.total_cost.max(unit);
        prop_assert!((fast.total_cost - exact.total_cost).abs() <= tolerance,
            "hungarian {} vs exhaustive {} (unit {})", fast.total_cost, exact.total_cost, unit);
    }

    #[test]
    fn assignment_is_injective((rows, real, holes, matrix) in arb_problem()) {
        let distances = DistanceMatrix::from_rows(matrix).unwrap();
        let indices1: Vec<usize> = (0..rows).collect();
        let indices2 = slots(real, holes);

        for assignment in [
            best_match(&indices1, &indices2, &distances).unwrap(),
            best_match_exhaustive(&indices1, &indices2, &distances).unwrap(),
        ] {
            prop_assert_eq!(assignment.len(), rows);
            let mut used: Vec<usize> = assignment.matched().map(|(_, s)| s).collect();
            let matched = used.len();
            used.sort_unstable();
            used.dedup();
            prop_assert_eq!(used.len(), matched);
            // Placeholder pairs never exceed the number of placeholder slots
            prop_assert!(assignment.unmatched().count() <= holes);
        }
    }

    #[test]
    fn total_cost_is_sum_of_real_pairs((rows, real, holes, matrix) in arb_problem()) {
        let distances = DistanceMatrix::from_rows(matrix).unwrap();
        let indices1: Vec<usize> = (0..rows).collect();
        let assignment = best_match(&indices1, &slots(real, holes), &distances).unwrap();

        let sum: f64 = assignment
            .matched()
            .map(|(r, c)| distances.get(r, c).unwrap())
            .sum();
        prop_assert!((sum - assignment.total_cost).abs() < 1e-9);
    }
}
