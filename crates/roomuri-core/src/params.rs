//! URL parameters carried in the query or fragment.
//!
//! [`parse_url_params`] reads back what the fragment encoder writes
//! (`#config.startWithAudioMuted=true`), and the `append_*` helpers add single
//! parameters to an existing URL.

use percent_encoding::percent_decode_str;
use serde_json::{Map, Value};
use url::{form_urlencoded, Url};

use crate::bag::{encode_params, Overrides};
use crate::uri::UriRecord;
use crate::UriError;

/// Which component [`parse_url_params`] reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParamSource {
    #[default]
    Hash,
    Search,
}

/// Parses `k=v&...` parameters out of the record's hash or search.
///
/// Values are percent-decoded and read as JSON unless `dont_parse` is set,
/// in which case the raw strings are returned. Keys whose value cannot be
/// decoded are skipped. A hash consisting of a single `/`-prefixed part is a
/// client-side route and yields no parameters.
pub fn parse_url_params(
    record: &UriRecord,
    source: ParamSource,
    dont_parse: bool,
) -> Map<String, Value> {
    let raw = match source {
        ParamSource::Hash => &record.hash,
        ParamSource::Search => &record.search,
    };
    let mut params = Map::new();
    let Some(body) = raw.get(1..) else {
        return params;
    };

    let parts: Vec<&str> = body.split('&').collect();
    if source == ParamSource::Hash && parts.len() == 1 && parts[0].starts_with('/') {
        return params;
    }

    for part in parts {
        let mut pieces = part.split('=');
        let key = pieces.next().unwrap_or_default();
        if key.is_empty() {
            continue;
        }
        let value = pieces.next();

        if dont_parse {
            params.insert(
                key.to_string(),
                value.map_or(Value::Null, |v| Value::String(v.to_string())),
            );
            continue;
        }

        let Some(value) = value else {
            continue;
        };
        match parse_param_value(value) {
            Ok(Some(parsed)) => {
                params.insert(key.to_string(), parsed);
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(key, value, "failed to parse URL parameter value: {err}");
            }
        }
    }
    params
}

/// Percent-decodes and reads one value as JSON; `undefined` reads as nothing.
fn parse_param_value(value: &str) -> anyhow::Result<Option<Value>> {
    let decoded = percent_decode_str(value).decode_utf8()?;
    let decoded = decoded.replacen("\\&", "&", 1);
    if decoded == "undefined" {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(&decoded)?))
}

/// Merges `extra` into the parameters already in the record's hash and
/// rewrites the hash as `#k=<encoded JSON>&...`. A hash holding no
/// parameters (such as a `#/route`) is cleared.
pub fn add_hash_params(record: &mut UriRecord, extra: &Overrides) {
    let mut params = parse_url_params(record, ParamSource::Hash, false);
    for (key, value) in extra {
        params.insert(key.clone(), value.clone());
    }
    if params.is_empty() {
        record.hash.clear();
        return;
    }

    let mut diagnostics = Vec::new();
    let encoded = encode_params("hash", &params, &mut diagnostics);
    for d in &diagnostics {
        tracing::warn!("{d}");
    }
    record.hash = format!("#{}", encoded.join("&"));
}

/// Appends a form-encoded `name=value` pair to the query of `url`.
pub fn append_url_param(url: &str, name: &str, value: &str) -> Result<String, UriError> {
    let mut parsed = parse_url(url)?;
    parsed.query_pairs_mut().append_pair(name, value);
    Ok(parsed.into())
}

/// Appends a form-encoded `name=value` pair to the fragment of `url`,
/// keeping the pairs already there.
pub fn append_url_hash_param(url: &str, name: &str, value: &str) -> Result<String, UriError> {
    let mut parsed = parse_url(url)?;
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    if let Some(fragment) = parsed.fragment() {
        serializer.extend_pairs(form_urlencoded::parse(fragment.as_bytes()));
    }
    serializer.append_pair(name, value);
    let fragment = serializer.finish();
    parsed.set_fragment(Some(&fragment));
    Ok(parsed.into())
}

fn parse_url(url: &str) -> Result<Url, UriError> {
    Url::parse(url).map_err(|source| UriError::InvalidUrl {
        input: url.to_string(),
        source,
    })
}

/// Percent-decodes `s`; input that does not decode to UTF-8 is returned as is.
pub fn safe_decode_uri_component(s: &str) -> String {
    match percent_decode_str(s).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => s.to_string(),
    }
}

/// Display form of a URI: `http(s)://` removed and the rest decoded.
pub fn decoded_uri(uri: &str) -> String {
    let stripped = ["https://", "http://"]
        .iter()
        .find_map(|prefix| {
            uri.get(..prefix.len())
                .filter(|head| head.eq_ignore_ascii_case(prefix))
                .map(|_| &uri[prefix.len()..])
        })
        .unwrap_or(uri);
    safe_decode_uri_component(stripped)
}
