//! Element detection.

use serde_json::Value;

/// Key whose presence marks a JSON object as an API Elements element.
pub const ELEMENT_KEY: &str = "element";

/// Returns `true` if `value` is an object containing [`ELEMENT_KEY`].
///
/// Arrays, scalars and objects without the key are not elements and must
/// not be validated against the element schema.
#[must_use]
pub fn is_schema_bound(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|obj| obj.contains_key(ELEMENT_KEY))
}

/// The element name (e.g. `"object"`, `"string"`) if `value` is an element
/// whose `element` key holds a string.
#[must_use]
pub fn element_name(value: &Value) -> Option<&str> {
    value.get(ELEMENT_KEY).and_then(Value::as_str)
}
