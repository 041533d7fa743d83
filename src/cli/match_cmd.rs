//! Match command handler.
//!
//! Solves a best-match problem read from a JSON file:
//!
//! ```json
//! {
//!   "indices1": [0, 1],
//!   "indices2": [0, 1, null],
//!   "distances": [[0.2, 0.9], [0.8, 0.1]]
//! }
//! ```
//!
//! `null` in `indices2` is a placeholder slot meaning "no counterpart".

use crate::config::MatchingConfig;
use crate::matching::{best_match_with, DistanceMatrix, MatchAssignment, MatchStrategy};
use crate::pipeline::{write_output, OutputTarget};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A best-match problem as stored on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchProblem {
    pub indices1: Vec<usize>,
    pub indices2: Vec<Option<usize>>,
    pub distances: DistanceMatrix,
}

#[derive(Debug, Serialize)]
struct MatchOutput {
    strategy: MatchStrategy,
    #[serde(flatten)]
    assignment: MatchAssignment,
}

/// Solve a match problem and return the assignment.
pub fn solve_match_problem(problem: &MatchProblem, config: &MatchingConfig) -> Result<MatchAssignment> {
    let assignment = best_match_with(
        config.strategy,
        config.exhaustive_limit,
        &problem.indices1,
        &problem.indices2,
        &problem.distances,
    )?;
    Ok(assignment)
}

/// Run the match command.
pub fn run_match(
    path: &Path,
    config: &MatchingConfig,
    output_file: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read match problem: {}", path.display()))?;
    let problem: MatchProblem = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse match problem: {}", path.display()))?;

    if !quiet {
        tracing::info!(
            "Matching {} items into {} slots with {} solver",
            problem.indices1.len(),
            problem.indices2.len(),
            config.strategy
        );
    }

    let assignment = solve_match_problem(&problem, config)
        .with_context(|| format!("Failed to solve {}", path.display()))?;

    let output = MatchOutput {
        strategy: config.strategy,
        assignment,
    };
    let json = serde_json::to_string_pretty(&output)?;
    write_output(&json, &OutputTarget::from_option(output_file), quiet)
}
