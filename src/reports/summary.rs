//! Summary report generator for shell output.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::RecordComparison;
use crate::model::Path;

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

/// Entry paths listed per section before eliding the rest.
const MAX_LISTED: usize = 10;

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn push_section(&self, lines: &mut Vec<String>, marker: &str, color: &str, paths: &[Path]) {
        for path in paths.iter().take(MAX_LISTED) {
            lines.push(format!("    {} {path}", self.color(marker, color)));
        }
        if paths.len() > MAX_LISTED {
            lines.push(format!(
                "    {}",
                self.color(&format!("... {} more", paths.len() - MAX_LISTED), "dim")
            ));
        }
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn plural(n: usize, one: &'static str, many: &'static str) -> &'static str {
    if n == 1 {
        one
    } else {
        many
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate_diff_report(
        &self,
        result: &RecordComparison,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        let summary = &result.summary;
        let classification = &result.classification;

        lines.push(self.color("Record Diff Summary", "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));

        let a = config.metadata.record_a.as_deref().unwrap_or("A");
        let b = config.metadata.record_b.as_deref().unwrap_or("B");
        lines.push(format!("{}  {a} → {b}", self.color("Records:", "cyan")));
        lines.push(String::new());

        lines.push(self.color("Changes:", "bold"));
        if summary.added > 0 {
            lines.push(format!(
                "  {} {} added ({} {})",
                self.color(&format!("+{}", summary.added), "green"),
                plural(summary.added, "path", "paths"),
                summary.leaves_added,
                plural(summary.leaves_added, "leaf", "leaves"),
            ));
            self.push_section(&mut lines, "+", "green", &classification.paths_added);
        }
        if summary.removed > 0 {
            lines.push(format!(
                "  {} {} removed ({} {})",
                self.color(&format!("-{}", summary.removed), "red"),
                plural(summary.removed, "path", "paths"),
                summary.leaves_removed,
                plural(summary.leaves_removed, "leaf", "leaves"),
            ));
            self.push_section(&mut lines, "-", "red", &classification.paths_removed);
        }
        if summary.altered > 0 {
            lines.push(format!(
                "  {} {} altered ({} → {} leaves)",
                self.color(&format!("~{}", summary.altered), "yellow"),
                plural(summary.altered, "path", "paths"),
                summary.leaves_altered_1,
                summary.leaves_altered_2,
            ));
            self.push_section(&mut lines, "~", "yellow", &classification.paths_altered_1);
        }
        if !summary.has_changes() {
            lines.push(format!("  {}", self.color("No changes", "dim")));
        }

        lines.push(String::new());
        let distance = summary.deep_distance;
        let distance_color = if distance == 0.0 {
            "green"
        } else if distance < 0.3 {
            "yellow"
        } else {
            "red"
        };
        lines.push(format!(
            "{}  {}",
            self.color("Distance:", "cyan"),
            self.color(&format!("{distance:.4}"), distance_color)
        ));

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}
