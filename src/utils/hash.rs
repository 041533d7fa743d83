//! Content hashing utilities.

use serde_json::Value;
use xxhash_rust::xxh3::Xxh3;

/// Structural hash of a JSON value.
///
/// Numbers hash by their `f64` value so `1` and `1.0` collide, and mapping
/// keys are hashed in sorted order. Equal values (per
/// [`values_equal`](crate::model::values_equal)) always hash equally; the
/// converse does not hold, so callers must confirm a hash hit.
#[must_use]
pub fn value_hash(value: &Value) -> u64 {
    let mut hasher = Xxh3::new();
    feed(value, &mut hasher);
    hasher.digest()
}

fn feed(value: &Value, hasher: &mut Xxh3) {
    match value {
        Value::Null => hasher.update(&[0]),
        Value::Bool(b) => hasher.update(&[1, u8::from(*b)]),
        Value::Number(n) => {
            hasher.update(&[2]);
            let normalized = n.as_f64().map_or(0.0, |f| if f == 0.0 { 0.0 } else { f });
            hasher.update(&normalized.to_bits().to_le_bytes());
        }
        Value::String(s) => {
            hasher.update(&[3]);
            hasher.update(&(s.len() as u64).to_le_bytes());
            hasher.update(s.as_bytes());
        }
        Value::Array(items) => {
            hasher.update(&[4]);
            hasher.update(&(items.len() as u64).to_le_bytes());
            for item in items {
                feed(item, hasher);
            }
        }
        Value::Object(map) => {
            hasher.update(&[5]);
            hasher.update(&(map.len() as u64).to_le_bytes());
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            for key in keys {
                hasher.update(&(key.len() as u64).to_le_bytes());
                hasher.update(key.as_bytes());
                if let Some(child) = map.get(key) {
                    feed(child, hasher);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_hash_numeric_normalization() {
        assert_eq!(value_hash(&json!(1)), value_hash(&json!(1.0)));
        assert_eq!(value_hash(&json!(-0.0)), value_hash(&json!(0)));
        assert_ne!(value_hash(&json!(1)), value_hash(&json!("1")));
    }

    #[test]
    fn test_value_hash_is_order_sensitive_for_arrays_only() {
        assert_ne!(value_hash(&json!([1, 2])), value_hash(&json!([2, 1])));
        assert_eq!(
            value_hash(&json!({"a": 1, "b": 2})),
            value_hash(&json!({"b": 2, "a": 1}))
        );
    }

    #[test]
    fn test_value_hash_nesting_is_unambiguous() {
        assert_ne!(value_hash(&json!([[1], 2])), value_hash(&json!([1, [2]])));
        assert_ne!(value_hash(&json!({"ab": "c"})), value_hash(&json!({"a": "bc"})));
    }
}
