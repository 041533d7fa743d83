//! Trait seam for the order-insensitive tree-diff primitive.

use super::DiffReport;
use crate::error::Result;
use serde_json::Value;

/// Produces a [`DiffReport`] for two records.
///
/// The classifier only depends on this trait, so any tree-differencing
/// algorithm that reports entries with both sides' raw values and paths can
/// be swapped in. [`UnorderedDiffer`](super::UnorderedDiffer) is the
/// implementation shipped with the crate.
pub trait TreeDiffer: Send + Sync {
    /// Compare record `a` against record `b`.
    fn diff(&self, a: &Value, b: &Value) -> Result<DiffReport>;

    /// Get the name of this differ for logging/debugging.
    fn name(&self) -> &str;
}

impl<T: TreeDiffer + ?Sized> TreeDiffer for Box<T> {
    fn diff(&self, a: &Value, b: &Value) -> Result<DiffReport> {
        (**self).diff(a, b)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// A differ that replays a fixed report, whatever the inputs.
///
/// Lets callers run an externally computed report through the same engine.
#[derive(Debug, Clone, Default)]
pub struct PrecomputedDiffer {
    report: DiffReport,
}

impl PrecomputedDiffer {
    #[must_use]
    pub const fn new(report: DiffReport) -> Self {
        Self { report }
    }
}

impl TreeDiffer for PrecomputedDiffer {
    fn diff(&self, _a: &Value, _b: &Value) -> Result<DiffReport> {
        Ok(self.report.clone())
    }

    fn name(&self) -> &str {
        "precomputed"
    }
}
