//! Shared helpers for the integration tests.

use roomuri_core::{url_object_to_string, UrlPropertyBag};

/// Builds a bag from JSON and stringifies it, panicking on error.
pub fn stringify(value: serde_json::Value) -> Option<String> {
    let bag = UrlPropertyBag::from_json(&value);
    url_object_to_string(&bag).expect("stringify")
}
