//! `roomuri params <uri>` – print fragment or query parameters.

use anyhow::Result;
use roomuri_core::params::{parse_url_params, ParamSource};
use roomuri_core::uri::{fix_scheme, parse_standard_uri};

pub fn run_params(uri: &str, search: bool, raw: bool) -> Result<String> {
    let record = parse_standard_uri(&fix_scheme(uri));
    let source = if search {
        ParamSource::Search
    } else {
        ParamSource::Hash
    };
    let params = parse_url_params(&record, source, raw);
    Ok(serde_json::to_string_pretty(&params)?)
}
