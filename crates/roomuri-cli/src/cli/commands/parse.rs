//! `roomuri parse <uri>` – print the meeting URI components.

use anyhow::{Context, Result};
use roomuri_core::parse_uri_string;

pub fn run_parse(uri: &str) -> Result<String> {
    let record = parse_uri_string(Some(uri)).context("no URI given")?;
    Ok(serde_json::to_string_pretty(&record)?)
}
