//! Top-level entry point: any supported input shape → URL string.

use serde_json::Value;
use url::Url;

use crate::bag::{url_object_to_string, UrlPropertyBag};
use crate::UriError;

/// The input shapes [`to_url_string`] accepts.
#[derive(Debug, Clone)]
pub enum UrlInput {
    Url(Url),
    Bag(UrlPropertyBag),
    Str(String),
    /// Anything else (numbers, booleans, null); always yields `None`.
    Other,
}

impl From<Url> for UrlInput {
    fn from(url: Url) -> Self {
        UrlInput::Url(url)
    }
}

impl From<UrlPropertyBag> for UrlInput {
    fn from(bag: UrlPropertyBag) -> Self {
        UrlInput::Bag(bag)
    }
}

impl From<String> for UrlInput {
    fn from(s: String) -> Self {
        UrlInput::Str(s)
    }
}

impl From<&str> for UrlInput {
    fn from(s: &str) -> Self {
        UrlInput::Str(s.to_string())
    }
}

/// Reduces `input` to a URL string.
///
/// URL objects yield their absolute form, bags go through
/// [`url_object_to_string`], strings are returned unchanged.
pub fn to_url_string(input: UrlInput) -> Result<Option<String>, UriError> {
    match input {
        UrlInput::Url(url) => Ok(Some(url.into())),
        UrlInput::Bag(bag) => url_object_to_string(&bag),
        UrlInput::Str(s) => Ok(Some(s)),
        UrlInput::Other => Ok(None),
    }
}

/// [`to_url_string`] for dynamically typed JSON input.
///
/// Objects are read as property bags and arrays as empty ones, strings pass
/// through, and null, numbers and booleans yield `None`. Loosely typed bag
/// fields are coerced, so only a failed URL join is an error.
pub fn to_url_string_value(value: &Value) -> Result<Option<String>, UriError> {
    let input = match value {
        Value::Object(_) | Value::Array(_) => UrlInput::Bag(UrlPropertyBag::from_json(value)),
        Value::String(s) => UrlInput::Str(s.clone()),
        _ => UrlInput::Other,
    };
    to_url_string(input)
}
