//! Data model shared by the flattener, the differ and the classifier.
//!
//! Records are plain [`serde_json::Value`] trees. This module adds the typed
//! [`Path`] used to address their leaves, the [`Side`] sentinel used by diff
//! reports, and the [`FlatRecord`] produced by flattening.

mod path;
mod value;

pub use path::*;
pub use value::*;
