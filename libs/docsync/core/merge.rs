//! Merge-write semantics shared by all backends

use crate::traits::{DocSyncError, DocumentWrite, FieldWrite, Result};
use serde_json::{Map, Value};

/// Apply a merge write to the current document contents
///
/// A missing document starts as an empty object. Array operations treat a
/// missing or non-array field as an empty array.
pub fn apply_write(existing: Option<Value>, write: &DocumentWrite) -> Result<Value> {
    let mut document = match existing {
        None => Map::new(),
        Some(Value::Object(map)) => map,
        Some(other) => {
            return Err(DocSyncError::WriteRejected(format!(
                "document is not an object: {}",
                other
            )))
        }
    };

    for (field, op) in write.fields() {
        match op {
            FieldWrite::Set(value) => {
                document.insert(field.clone(), value.clone());
            }
            FieldWrite::ArrayUnion(values) => {
                let mut items = take_array(&mut document, field);
                for value in values {
                    if !items.contains(value) {
                        items.push(value.clone());
                    }
                }
                document.insert(field.clone(), Value::Array(items));
            }
            FieldWrite::ArrayRemove(values) => {
                let mut items = take_array(&mut document, field);
                items.retain(|item| !values.contains(item));
                document.insert(field.clone(), Value::Array(items));
            }
        }
    }

    Ok(Value::Object(document))
}

fn take_array(document: &mut Map<String, Value>, field: &str) -> Vec<Value> {
    match document.remove(field) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}
