//! Property bags: loosely typed URL descriptions merged into one URI.
//!
//! A bag may name the same logical component several ways (`protocol` or
//! `scheme`, `domain`/`host`/`hostname`, `config`/`configOverwrite`/...).
//! The aliases are settled once, in a fixed precedence order, before
//! [`url_object_to_string`] builds the URI.

mod fragment;
mod lenient;
mod stringify;

use serde::Deserialize;
use serde_json::Value;

pub use fragment::{encode_uri_component, Diagnostic};
pub use stringify::{url_object_to_string, url_object_to_string_with_diagnostics};

pub(crate) use fragment::{append_override_block, encode_params};

/// Per-namespace overrides; key order is preserved.
pub type Overrides = serde_json::Map<String, serde_json::Value>;

/// Input record for [`url_object_to_string`].
///
/// Field names follow the camelCase spelling used by web embedders so a
/// JSON object can be deserialized directly. Fields are read leniently:
/// numbers become strings, and `null`, `false`, `0` or a value of the wrong
/// shape leave the field unset.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlPropertyBag {
    #[serde(rename = "serverURL", default, deserialize_with = "lenient::scalar")]
    pub server_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::scalar")]
    pub room: Option<String>,
    #[serde(default, deserialize_with = "lenient::scalar")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient::scalar")]
    pub protocol: Option<String>,
    #[serde(default, deserialize_with = "lenient::scalar")]
    pub scheme: Option<String>,
    #[serde(default, deserialize_with = "lenient::scalar")]
    pub domain: Option<String>,
    #[serde(default, deserialize_with = "lenient::scalar")]
    pub host: Option<String>,
    #[serde(default, deserialize_with = "lenient::scalar")]
    pub hostname: Option<String>,
    /// Scheme used to read `domain` as an authority (e.g. `org.jitsi.meet:`).
    #[serde(default, deserialize_with = "lenient::scalar")]
    pub app_link_scheme: Option<String>,
    #[serde(default, deserialize_with = "lenient::scalar")]
    pub room_name: Option<String>,
    /// Pre-encoded token; appended to the query verbatim.
    #[serde(default, deserialize_with = "lenient::scalar")]
    pub jwt: Option<String>,

    #[serde(default, deserialize_with = "lenient::overrides")]
    pub config_overwrite: Option<Overrides>,
    #[serde(default, deserialize_with = "lenient::overrides")]
    pub config: Option<Overrides>,
    #[serde(default, deserialize_with = "lenient::overrides")]
    pub config_override: Option<Overrides>,
    #[serde(default, deserialize_with = "lenient::overrides")]
    pub interface_config_overwrite: Option<Overrides>,
    #[serde(default, deserialize_with = "lenient::overrides")]
    pub interface_config: Option<Overrides>,
    #[serde(default, deserialize_with = "lenient::overrides")]
    pub interface_config_override: Option<Overrides>,
    #[serde(default, deserialize_with = "lenient::overrides")]
    pub devices_overwrite: Option<Overrides>,
    #[serde(default, deserialize_with = "lenient::overrides")]
    pub devices: Option<Overrides>,
    #[serde(default, deserialize_with = "lenient::overrides")]
    pub devices_override: Option<Overrides>,
}

impl UrlPropertyBag {
    /// Reads a bag from a JSON value. Anything but an object yields an
    /// empty bag.
    pub fn from_json(value: &Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        Self::deserialize(value).unwrap_or_else(|err| {
            tracing::warn!("unreadable property bag, using an empty one: {err}");
            Self::default()
        })
    }
}

/// Fragment namespaces, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideNamespace {
    Config,
    InterfaceConfig,
    Devices,
}

impl OverrideNamespace {
    pub const ALL: [OverrideNamespace; 3] = [
        OverrideNamespace::Config,
        OverrideNamespace::InterfaceConfig,
        OverrideNamespace::Devices,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OverrideNamespace::Config => "config",
            OverrideNamespace::InterfaceConfig => "interfaceConfig",
            OverrideNamespace::Devices => "devices",
        }
    }
}

/// Aliases of a bag collapsed to one value per logical field.
///
/// Empty strings count as absent.
#[derive(Debug)]
pub(crate) struct ResolvedFields<'a> {
    pub server_url: Option<&'a str>,
    /// `room` as given; only used for the base string.
    pub room: Option<&'a str>,
    pub url: Option<&'a str>,
    pub protocol: Option<&'a str>,
    pub domain: Option<&'a str>,
    pub app_link_scheme: Option<&'a str>,
    /// `roomName`, falling back to `room`.
    pub room_name: Option<&'a str>,
    pub jwt: Option<&'a str>,
    pub overrides: Vec<(OverrideNamespace, &'a Overrides)>,
}

fn first<'a>(candidates: &[&'a Option<String>]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|c| Option::as_deref(*c))
        .find(|s| !s.is_empty())
}

impl<'a> ResolvedFields<'a> {
    pub fn from_bag(bag: &'a UrlPropertyBag) -> Self {
        let overrides = OverrideNamespace::ALL
            .into_iter()
            .filter_map(|ns| {
                let [overwrite, plain, override_] = match ns {
                    OverrideNamespace::Config => {
                        [&bag.config_overwrite, &bag.config, &bag.config_override]
                    }
                    OverrideNamespace::InterfaceConfig => [
                        &bag.interface_config_overwrite,
                        &bag.interface_config,
                        &bag.interface_config_override,
                    ],
                    OverrideNamespace::Devices => {
                        [&bag.devices_overwrite, &bag.devices, &bag.devices_override]
                    }
                };
                overwrite
                    .as_ref()
                    .or(plain.as_ref())
                    .or(override_.as_ref())
                    .map(|map| (ns, map))
            })
            .collect();

        Self {
            server_url: first(&[&bag.server_url]),
            room: first(&[&bag.room]),
            url: first(&[&bag.url]),
            protocol: first(&[&bag.protocol, &bag.scheme]),
            domain: first(&[&bag.domain, &bag.host, &bag.hostname]),
            app_link_scheme: first(&[&bag.app_link_scheme]),
            room_name: first(&[&bag.room_name, &bag.room]),
            jwt: first(&[&bag.jwt]),
            overrides,
        }
    }
}
