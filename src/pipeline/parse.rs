//! Record loading.
//!
//! Records are JSON or YAML documents; the format follows the file
//! extension.

use crate::error::{ErrorContext, ParseErrorKind, RecordDiffError, Result};
use serde_json::Value;
use std::path::Path;

/// Serialization format of a record file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    Json,
    Yaml,
}

impl RecordFormat {
    /// `.yaml`/`.yml` files are YAML; everything else is read as JSON.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Parse a record document.
pub fn parse_record_str(content: &str, format: RecordFormat) -> Result<Value> {
    match format {
        RecordFormat::Json => serde_json::from_str(content).map_err(|e| {
            RecordDiffError::parse("reading JSON record", ParseErrorKind::InvalidJson(e.to_string()))
        }),
        RecordFormat::Yaml => serde_yaml::from_str(content).map_err(|e| {
            RecordDiffError::parse("reading YAML record", ParseErrorKind::InvalidYaml(e.to_string()))
        }),
    }
}

/// Read and parse the record at `path`.
pub fn load_record(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path).map_err(|e| RecordDiffError::io(path, e))?;
    parse_record_str(&content, RecordFormat::from_path(path))
        .with_context(|| path.display().to_string())
}

/// Load a record with context for error messages
pub fn parse_record_with_context(path: &Path, quiet: bool) -> anyhow::Result<Value> {
    if !quiet {
        tracing::info!("Loading record: {:?}", path);
    }

    let record = load_record(path).map_err(|e| super::PipelineError::ParseFailed {
        path: path.display().to_string(),
        source: e.into(),
    })?;

    if !quiet {
        tracing::info!(
            "Loaded {} leaves from {}",
            crate::flatten::leaf_count(&record),
            path.display()
        );
    }
    Ok(record)
}
