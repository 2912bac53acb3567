#![forbid(unsafe_code)]

//! Specification document helpers.

use serde_json::Value;

/// Merge externally supplied data into a spec document.
///
/// The data lands under the spec's `"data"` key only when all of the
/// following hold: the spec is a JSON object, it carries no embedded
/// `"data"`, and the external data is a JSON array. The spec owns the
/// merged result. Returns whether a merge happened.
pub fn merge_external_data(spec: &mut Value, data: Option<&Value>) -> bool {
    let Some(data) = data else {
        return false;
    };
    if !data.is_array() {
        return false;
    }
    let Some(object) = spec.as_object_mut() else {
        return false;
    };
    if object.contains_key("data") {
        return false;
    }
    object.insert("data".to_owned(), data.clone());
    true
}
