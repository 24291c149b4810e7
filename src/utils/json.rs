use crate::error::{Error, Result};
use serde_json::Value as JsonValue;

/// Inserts one field into a JSON-object patch.
pub fn insert_field(patch: &mut JsonValue, key: &str, value: JsonValue) -> Result<()> {
    patch
        .as_object_mut()
        .ok_or_else(|| Error::Internal("patch must be a JSON object".to_string()))?
        .insert(key.to_string(), value);
    Ok(())
}
