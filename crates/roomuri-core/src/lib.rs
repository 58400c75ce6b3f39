//! Meeting-room URI toolkit.
//!
//! Parses meeting URIs into browser-`Location`-style records, sanitizes room
//! names, and rebuilds canonical URI strings from loosely typed property
//! bags carrying a server, a room, a token and config overrides.

pub mod bag;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod params;
pub mod uri;

pub use bag::{url_object_to_string, UrlPropertyBag};
pub use dispatch::{to_url_string, to_url_string_value, UrlInput};
pub use error::UriError;
pub use uri::{parse_standard_uri, parse_uri_string, render_uri, MeetingUriRecord, UriRecord};
