use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::bag::UrlPropertyBag;

/// App link scheme used when neither the bag nor the config names one.
pub const DEFAULT_APP_LINK_SCHEME: &str = "org.jitsi.meet:";

fn default_app_link_scheme() -> String {
    DEFAULT_APP_LINK_SCHEME.to_string()
}

/// Global configuration loaded from `~/.config/roomuri/config.toml`.
///
/// Values only fill property-bag fields the caller left empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomuriConfig {
    /// Scheme used to read a bare `domain` as an authority.
    #[serde(default = "default_app_link_scheme")]
    pub app_link_scheme: String,
    /// Protocol for bags that name none (e.g. "https").
    #[serde(default)]
    pub default_protocol: Option<String>,
    /// Server that bare room names are resolved against.
    #[serde(default)]
    pub default_server_url: Option<String>,
}

impl Default for RoomuriConfig {
    fn default() -> Self {
        Self {
            app_link_scheme: default_app_link_scheme(),
            default_protocol: None,
            default_server_url: None,
        }
    }
}

fn is_unset(field: &Option<String>) -> bool {
    field.as_deref().map_or(true, str::is_empty)
}

impl RoomuriConfig {
    /// Fills the bag fields that are absent or empty.
    pub fn apply_defaults(&self, bag: &mut UrlPropertyBag) {
        if is_unset(&bag.app_link_scheme) && !self.app_link_scheme.is_empty() {
            bag.app_link_scheme = Some(self.app_link_scheme.clone());
        }
        if is_unset(&bag.protocol) && is_unset(&bag.scheme) {
            if let Some(protocol) = &self.default_protocol {
                bag.protocol = Some(protocol.clone());
            }
        }
        if is_unset(&bag.server_url) {
            if let Some(server_url) = &self.default_server_url {
                bag.server_url = Some(server_url.clone());
            }
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("roomuri")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<RoomuriConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = RoomuriConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<RoomuriConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let cfg: RoomuriConfig = toml::from_str(&data)
        .with_context(|| format!("invalid config: {}", path.display()))?;
    Ok(cfg)
}
