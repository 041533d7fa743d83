//! Small helpers for nested collections.

use serde_json::Value;
use std::collections::HashMap;

/// Maximum nesting depth of mappings.
///
/// A non-mapping value or an empty mapping has depth 0; sequences are not
/// descended into.
#[must_use]
pub fn structure_depth(value: &Value) -> usize {
    match value {
        Value::Object(map) if !map.is_empty() => {
            1 + map.values().map(structure_depth).max().unwrap_or(0)
        }
        _ => 0,
    }
}

/// Concatenate a list of lists.
///
/// Returns the flat list together with a map from `(outer, inner)` position
/// to the element's index in the flat list. Typically used to score items
/// grouped per reaction input against a single flat distance matrix.
#[must_use]
pub fn flatten_nested<T: Clone>(lists: &[Vec<T>]) -> (Vec<T>, HashMap<(usize, usize), usize>) {
    let mut flat = Vec::with_capacity(lists.iter().map(Vec::len).sum());
    let mut positions = HashMap::new();
    for (i, sub_list) in lists.iter().enumerate() {
        for (j, item) in sub_list.iter().enumerate() {
            positions.insert((i, j), flat.len());
            flat.push(item.clone());
        }
    }
    (flat, positions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_structure_depth() {
        assert_eq!(structure_depth(&json!(1)), 0);
        assert_eq!(structure_depth(&json!({})), 0);
        assert_eq!(structure_depth(&json!({"a": 1})), 1);
        assert_eq!(structure_depth(&json!({"a": {"b": {"c": 1}}, "d": 2})), 3);
        assert_eq!(structure_depth(&json!({"a": [{"b": {"c": 1}}]})), 1);
    }

    #[test]
    fn test_flatten_nested_positions() {
        let lists = vec![vec!["a", "b"], vec![], vec!["c"]];
        let (flat, positions) = flatten_nested(&lists);

        assert_eq!(flat, vec!["a", "b", "c"]);
        assert_eq!(positions.len(), 3);
        assert_eq!(positions[&(0, 1)], 1);
        assert_eq!(positions[&(2, 0)], 2);
        assert!(!positions.contains_key(&(1, 0)));
    }
}
