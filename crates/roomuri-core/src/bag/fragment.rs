//! Encoding of override maps into fragment parameters.

use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

/// Everything `encodeURIComponent` escapes: all but `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes `s` for use inside a query or fragment component.
pub fn encode_uri_component(s: &str) -> String {
    utf8_percent_encode(s, URI_COMPONENT).to_string()
}

/// A non-fatal problem met while encoding one override key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub namespace: String,
    pub key: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error encoding {}.{}: {}", self.namespace, self.key, self.message)
    }
}

/// `key=<encoded JSON of value>`.
fn encode_param<V: Serialize + ?Sized>(key: &str, value: &V) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(value)?;
    Ok(format!("{key}={}", encode_uri_component(&json)))
}

/// Encodes every entry; keys whose value fails to serialize are skipped and
/// reported in `diagnostics`.
pub(crate) fn encode_params<'a, K, V, I>(
    namespace: &str,
    entries: I,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<String>
where
    K: AsRef<str> + 'a,
    V: Serialize + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    entries
        .into_iter()
        .filter_map(|(key, value)| {
            let key = key.as_ref();
            encode_param(key, value)
                .map_err(|e| {
                    diagnostics.push(Diagnostic {
                        namespace: namespace.to_string(),
                        key: key.to_string(),
                        message: e.to_string(),
                    })
                })
                .ok()
        })
        .collect()
}

/// Appends `<ns>.p1&<ns>.p2...` to `hash`, starting it with `#` or
/// separating it from earlier content with `&`.
pub(crate) fn append_override_block(hash: &mut String, namespace: &str, params: &[String]) {
    if params.is_empty() {
        return;
    }
    if hash.is_empty() {
        hash.push('#');
    } else {
        hash.push('&');
    }
    hash.push_str(namespace);
    hash.push('.');
    let separator = format!("&{namespace}.");
    hash.push_str(&params.join(separator.as_str()));
}
