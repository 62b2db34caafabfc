//! Dotted key-path removal over JSON trees
//!
//! Paths are `.`-separated segments. Object segments name keys, array
//! segments are decimal indices. Only the final segment is removed; the
//! rest of the tree is left as it was.

use serde_json::{Map, Value};

/// Removes the node at `path` and returns it
///
/// Returns `None` (and leaves `value` untouched) when any segment along the
/// way does not exist or walks into a scalar.
///
/// # Example
/// ```
/// use jobdef_core::key_path::remove_path;
/// use serde_json::json;
///
/// let mut doc = json!({"a": {"b": 1, "c": 2}});
/// assert_eq!(remove_path(&mut doc, "a.b"), Some(json!(1)));
/// assert_eq!(doc, json!({"a": {"c": 2}}));
/// ```
pub fn remove_path(value: &mut Value, path: &str) -> Option<Value> {
    if path.is_empty() {
        return None;
    }
    let segments: Vec<&str> = path.split('.').collect();
    remove_segments(value, &segments)
}

/// Same as [`remove_path`], rooted at an object rather than a value
pub fn remove_object_path(map: &mut Map<String, Value>, path: &str) -> Option<Value> {
    if path.is_empty() {
        return None;
    }
    match path.split_once('.') {
        None => map.shift_remove(path),
        Some((head, rest)) => remove_path(map.get_mut(head)?, rest),
    }
}

fn remove_segments(value: &mut Value, segments: &[&str]) -> Option<Value> {
    let (head, rest) = segments.split_first()?;

    if rest.is_empty() {
        return match value {
            Value::Object(map) => map.shift_remove(*head),
            Value::Array(items) => {
                let index = head.parse::<usize>().ok()?;
                (index < items.len()).then(|| items.remove(index))
            }
            _ => None,
        };
    }

    let child = match value {
        Value::Object(map) => map.get_mut(*head)?,
        Value::Array(items) => items.get_mut(head.parse::<usize>().ok()?)?,
        _ => return None,
    };
    remove_segments(child, rest)
}
