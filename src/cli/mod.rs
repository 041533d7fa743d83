//! CLI command handlers.
//!
//! Testable command handlers invoked by main.rs, one per subcommand.

mod audit;
mod classify;
mod diff;
mod flatten;
mod match_cmd;

pub use audit::{audit_dirs, run_audit, AuditEntry, AuditReport};
pub use classify::run_classify;
pub use diff::run_diff;
pub use flatten::run_flatten;
pub use match_cmd::{run_match, solve_match_problem, MatchProblem};

// Re-export config types used by handlers
pub use crate::config::{AppConfig, DiffConfig};
