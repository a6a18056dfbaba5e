//! Flatten nested JSON objects into single-level rows

use serde_json::{Map, Value};

use crate::error::{json_kind, FlattenError};

/// A flattened record: dotted key path to scalar or array value, in insertion order
pub type FlatRow = Map<String, Value>;

/// Flatten an object. Nested objects become dotted keys; arrays are kept whole.
///
/// ```
/// use serde_json::json;
/// use jsonsheet::conversion::flatten::flatten;
///
/// let object = json!({"a": {"b": 1}, "tags": ["x", "y"]});
/// let row = flatten(object.as_object().unwrap());
/// assert_eq!(row["a.b"], json!(1));
/// assert_eq!(row["tags"], json!(["x", "y"]));
/// ```
pub fn flatten(object: &Map<String, Value>) -> FlatRow {
    flatten_with_prefix(object, "")
}

/// Flatten an object under `prefix`
pub fn flatten_with_prefix(object: &Map<String, Value>, prefix: &str) -> FlatRow {
    let mut out = FlatRow::new();
    // Unbounded depth cannot fail
    let _ = flatten_into(object, prefix, 0, None, &mut out);
    out
}

/// Flatten any JSON value, failing for non-objects and overly deep nesting
pub fn flatten_value(value: &Value, max_depth: Option<usize>) -> Result<FlatRow, FlattenError> {
    let Value::Object(object) = value else {
        return Err(FlattenError::NotAnObject {
            found: json_kind(value),
        });
    };

    let mut out = FlatRow::new();
    flatten_into(object, "", 0, max_depth, &mut out)?;
    Ok(out)
}

fn flatten_into(
    object: &Map<String, Value>,
    prefix: &str,
    depth: usize,
    max_depth: Option<usize>,
    out: &mut FlatRow,
) -> Result<(), FlattenError> {
    if let Some(limit) = max_depth {
        if depth > limit {
            return Err(FlattenError::TooDeep {
                path: prefix.to_string(),
                limit,
            });
        }
    }

    for (key, value) in object {
        let new_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match value {
            Value::Object(nested) => flatten_into(nested, &new_key, depth + 1, max_depth, out)?,
            other => {
                out.insert(new_key, other.clone());
            }
        }
    }

    Ok(())
}
