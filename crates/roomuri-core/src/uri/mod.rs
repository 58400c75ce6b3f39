//! URI parsing and reconstruction.
//!
//! A hand-written scanner splits a URI into the browser `Location` fields
//! (protocol, host, hostname, port, pathname, search, hash). Scheme fixing
//! and room sanitization run on top of it to read meeting URIs.

mod meeting;
mod parse;
mod room;
mod scheme;

pub use meeting::{parse_uri_string, MeetingUriRecord};
pub use parse::{parse_standard_uri, render_uri, UriRecord};
pub use room::{context_root, sanitize_room_name};
pub use scheme::fix_scheme;
