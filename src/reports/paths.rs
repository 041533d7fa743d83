//! Line-oriented path listing.
//!
//! Each line is `<marker>\t<path>` where the marker is `+` (added), `-`
//! (removed), `<` (altered, A side) or `>` (altered, B side).

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::RecordComparison;
use crate::model::Path;
use std::fmt::Write as _;

#[derive(Debug, Default)]
pub struct PathsReporter;

impl PathsReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn push_lines(out: &mut String, marker: char, paths: &[Path]) -> Result<(), ReportError> {
    for path in paths {
        writeln!(out, "{marker}\t{path}")?;
    }
    Ok(())
}

impl ReportGenerator for PathsReporter {
    fn generate_diff_report(
        &self,
        result: &RecordComparison,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let c = &result.classification;
        let mut out = String::new();
        if config.leaf_paths {
            push_lines(&mut out, '+', &c.leaf_paths_added)?;
            push_lines(&mut out, '-', &c.leaf_paths_removed)?;
            push_lines(&mut out, '<', &c.leaf_paths_altered_1)?;
            push_lines(&mut out, '>', &c.leaf_paths_altered_2)?;
        } else {
            push_lines(&mut out, '+', &c.paths_added)?;
            push_lines(&mut out, '-', &c.paths_removed)?;
            push_lines(&mut out, '<', &c.paths_altered_1)?;
            push_lines(&mut out, '>', &c.paths_altered_2)?;
        }
        Ok(out)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Paths
    }
}
