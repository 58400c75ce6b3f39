//! `roomuri stringify <json>` – build a canonical URI from a property bag.

use anyhow::{Context, Result};
use roomuri_core::config::RoomuriConfig;
use roomuri_core::{to_url_string_value, url_object_to_string, UrlPropertyBag};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Where the property bag JSON comes from.
#[derive(Debug, Clone)]
pub enum BagSource {
    Inline(String),
    File(PathBuf),
}

impl BagSource {
    fn read(&self) -> Result<Value> {
        let text = match self {
            BagSource::Inline(json) => json.clone(),
            BagSource::File(path) => fs::read_to_string(path)
                .with_context(|| format!("failed to read property bag: {}", path.display()))?,
        };
        serde_json::from_str(&text).context("property bag is not valid JSON")
    }
}

/// Objects get config defaults applied before stringifying; any other JSON
/// value goes through the generic dispatcher.
pub fn run_stringify(source: &BagSource, cfg: Option<&RoomuriConfig>) -> Result<Option<String>> {
    let value = source.read()?;
    if !value.is_object() {
        return Ok(to_url_string_value(&value)?);
    }

    let mut bag = UrlPropertyBag::from_json(&value);
    if let Some(cfg) = cfg {
        cfg.apply_defaults(&mut bag);
    }
    Ok(url_object_to_string(&bag)?)
}
