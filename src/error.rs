//! Unified error types for record-diff.
//!
//! This module provides the error hierarchy for the library, with context
//! strings that chain as errors propagate outward.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for record-diff operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RecordDiffError {
    /// Errors while reading a record document
    #[error("Failed to parse record: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// Errors during diff computation or classification
    #[error("Diff computation failed: {context}")]
    Diff {
        context: String,
        #[source]
        source: DiffErrorKind,
    },

    /// Errors during best-match assignment
    #[error("Matching operation failed: {context}")]
    Matching {
        context: String,
        #[source]
        source: MatchingErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// A guarded computation did not finish before its deadline
    #[error("Timed out after {seconds:.3}s: {context}")]
    Timeout { context: String, seconds: f64 },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("Invalid JSON document: {0}")]
    InvalidJson(String),

    #[error("Invalid YAML document: {0}")]
    InvalidYaml(String),
}

/// Specific diff error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DiffErrorKind {
    /// The upstream differ produced an entry that cannot be classified.
    #[error("Invalid diff state: {0}")]
    InvalidState(String),
}

/// Specific matching error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MatchingErrorKind {
    #[error("Not enough candidates: {needed} indices to place into {available} slots")]
    InsufficientCandidates { needed: usize, available: usize },

    #[error("Distance matrix has no entry for ({row}, {col})")]
    MissingDistance { row: usize, col: usize },

    #[error("Index {0} appears more than once")]
    DuplicateIndex(usize),

    #[error("Invalid distance {value} at ({row}, {col}): must be finite and non-negative")]
    InvalidDistance { row: usize, col: usize, value: f64 },

    #[error("Exhaustive search over {size} indices exceeds the limit of {limit}")]
    TooLarge { size: usize, limit: usize },

    #[error("No assignment found")]
    NoAssignment,

    #[error("Malformed distance matrix: {0}")]
    MalformedMatrix(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for record-diff operations
pub type Result<T> = std::result::Result<T, RecordDiffError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl RecordDiffError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create a diff error with context
    pub fn diff(context: impl Into<String>, source: DiffErrorKind) -> Self {
        Self::Diff {
            context: context.into(),
            source,
        }
    }

    /// Create an invalid-state error raised by the classifier
    pub fn invalid_state(context: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::diff(context, DiffErrorKind::InvalidState(detail.into()))
    }

    /// Create a matching error with context
    pub fn matching(context: impl Into<String>, source: MatchingErrorKind) -> Self {
        Self::Matching {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a timeout error
    pub fn timeout(context: impl Into<String>, seconds: f64) -> Self {
        Self::Timeout {
            context: context.into(),
            seconds,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether this error reports a broken upstream diff invariant.
    #[must_use]
    pub const fn is_invalid_state(&self) -> bool {
        matches!(
            self,
            Self::Diff {
                source: DiffErrorKind::InvalidState(_),
                ..
            }
        )
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for RecordDiffError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for RecordDiffError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(
            "JSON deserialization",
            ParseErrorKind::InvalidJson(err.to_string()),
        )
    }
}

impl From<serde_yaml::Error> for RecordDiffError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::parse(
            "YAML deserialization",
            ParseErrorKind::InvalidYaml(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// The context string is prepended to the error's existing context, so a
/// failure deep inside the classifier reads like
/// `"comparing a.json: classifying entry 3: ..."` once it reaches the CLI.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure (lazy evaluation).
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<RecordDiffError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: RecordDiffError, new_ctx: &str) -> RecordDiffError {
    match err {
        RecordDiffError::Parse {
            context: existing,
            source,
        } => RecordDiffError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        RecordDiffError::Diff {
            context: existing,
            source,
        } => RecordDiffError::Diff {
            context: chain_context(new_ctx, &existing),
            source,
        },
        RecordDiffError::Matching {
            context: existing,
            source,
        } => RecordDiffError::Matching {
            context: chain_context(new_ctx, &existing),
            source,
        },
        RecordDiffError::Io {
            path,
            message,
            source,
        } => RecordDiffError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        RecordDiffError::Timeout {
            context: existing,
            seconds,
        } => RecordDiffError::Timeout {
            context: chain_context(new_ctx, &existing),
            seconds,
        },
        RecordDiffError::Config(msg) => RecordDiffError::Config(chain_context(new_ctx, &msg)),
        RecordDiffError::Validation(msg) => {
            RecordDiffError::Validation(chain_context(new_ctx, &msg))
        }
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;

    /// Convert None to an error with context from a closure.
    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| RecordDiffError::Validation(context.into()))
    }

    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.ok_or_else(|| RecordDiffError::Validation(f().into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RecordDiffError::invalid_state("classifying entry 0", "both sides absent");
        let display = err.to_string();
        assert!(display.contains("classifying entry 0"), "{display}");
        assert!(err.is_invalid_state());

        let err = RecordDiffError::matching(
            "best match",
            MatchingErrorKind::InsufficientCandidates {
                needed: 3,
                available: 2,
            },
        );
        assert!(!err.is_invalid_state());
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(
            source.as_deref(),
            Some("Not enough candidates: 3 indices to place into 2 slots")
        );
    }

    #[test]
    fn test_io_error_carries_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = RecordDiffError::io("/path/to/record.json", io_err);

        assert!(err.to_string().contains("/path/to/record.json"));
    }

    #[test]
    fn test_context_chaining_multiple_levels() {
        fn inner() -> Result<()> {
            Err(RecordDiffError::invalid_state("base", "neither side present"))
        }

        fn middle() -> Result<()> {
            inner().context("middle layer")
        }

        fn outer() -> Result<()> {
            middle().context("outer layer")
        }

        match outer() {
            Err(RecordDiffError::Diff { context, source }) => {
                assert_eq!(context, "outer layer: middle layer: base");
                assert!(matches!(source, DiffErrorKind::InvalidState(_)));
            }
            other => panic!("Expected Diff error, got {other:?}"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;

        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called, "Closure should not be called for Ok result");

        let err_result: Result<i32> = Err(RecordDiffError::validation("error"));
        let _ = err_result.with_context(|| {
            called = true;
            "should be called"
        });
        assert!(called, "Closure should be called for Err result");
    }

    #[test]
    fn test_timeout_context_chains() {
        let err: Result<()> = Err(RecordDiffError::timeout("", 1.5));
        match err.context("diff a.json b.json") {
            Err(RecordDiffError::Timeout { context, seconds }) => {
                assert_eq!(context, "diff a.json b.json");
                assert!((seconds - 1.5).abs() < f64::EPSILON);
            }
            other => panic!("Expected Timeout error, got {other:?}"),
        }
    }

    #[test]
    fn test_option_context() {
        let some_value: Option<i32> = Some(42);
        assert_eq!(some_value.context_none("missing value").unwrap(), 42);

        let none_value: Option<i32> = None;
        match none_value.context_none("missing value") {
            Err(RecordDiffError::Validation(msg)) => assert_eq!(msg, "missing value"),
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("new", "existing"), "new: existing");
    }
}
