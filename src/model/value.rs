//! Leaf values, flattened records and the not-present sentinel.

use super::Path;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Value stored at a leaf path.
///
/// `Some` always holds a scalar (JSON `null` included). `None` marks "no
/// value": an empty mapping or sequence, or the absent side of a diff entry.
pub type LeafValue = Option<Value>;

/// A record reduced to its leaves, keyed by path.
///
/// Keys are unique. Iteration order is the deterministic walk order of the
/// flattener and carries no meaning of its own.
pub type FlatRecord = IndexMap<Path, LeafValue>;

/// One side of a diff entry.
///
/// `NotPresent` is distinct from a present JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum Side {
    Present(Value),
    NotPresent,
}

impl Side {
    #[must_use]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match self {
            Self::Present(v) => Some(v),
            Self::NotPresent => None,
        }
    }
}

impl From<Value> for Side {
    fn from(value: Value) -> Self {
        Self::Present(value)
    }
}

impl From<Option<Value>> for Side {
    fn from(value: Option<Value>) -> Self {
        value.map_or(Self::NotPresent, Self::Present)
    }
}

/// Coarse JSON type of a value, used in messages and for type-change detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    #[must_use]
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Array | Self::Object)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        };
        write!(f, "{name}")
    }
}

/// Structural equality with numeric comparison for numbers, so `1` equals `1.0`.
#[must_use]
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(i), Some(j)) => i == j,
            _ => match (x.as_u64(), y.as_u64()) {
                (Some(i), Some(j)) => i == j,
                _ => x.as_f64() == y.as_f64(),
            },
        },
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xm), Value::Object(ym)) => {
            xm.len() == ym.len()
                && xm
                    .iter()
                    .all(|(k, x)| ym.get(k).is_some_and(|y| values_equal(x, y)))
        }
        _ => a == b,
    }
}

/// Render a leaf value for line-oriented output.
#[must_use]
pub fn display_leaf(leaf: &LeafValue) -> String {
    match leaf {
        None => "None".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
