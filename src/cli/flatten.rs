//! Flatten command handler.

use crate::flatten::flatten;
use crate::model::display_leaf;
use crate::pipeline::{parse_record_with_context, write_output, OutputTarget};
use crate::utils::structure_depth;
use anyhow::Result;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Print every leaf of a record, one `path<TAB>value` line each, or as a
/// JSON array of `[path, value]` pairs.
pub fn run_flatten(path: &Path, json: bool, output_file: Option<PathBuf>, quiet: bool) -> Result<()> {
    let record = parse_record_with_context(path, quiet)?;
    let flat = flatten(&record);

    if !quiet {
        tracing::info!(
            "{} leaves, mapping depth {}",
            flat.len(),
            structure_depth(&record)
        );
    }

    let content = if json {
        let pairs: Vec<_> = flat.iter().collect();
        serde_json::to_string_pretty(&pairs)?
    } else {
        let mut out = String::new();
        for (leaf_path, value) in &flat {
            writeln!(out, "{leaf_path}\t{}", display_leaf(value))?;
        }
        out.trim_end_matches('\n').to_string()
    };

    write_output(&content, &OutputTarget::from_option(output_file), quiet)
}
