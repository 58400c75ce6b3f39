//! Meeting URIs: a standard URI plus the room and its context root.

use serde::Serialize;

use super::parse::{parse_standard_uri, UriRecord};
use super::room::{context_root, sanitize_room_name};
use super::scheme::fix_scheme;

/// A parsed meeting URI.
///
/// `uri.pathname` always equals `context_root` followed by `room` when a room
/// is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingUriRecord {
    #[serde(flatten)]
    pub uri: UriRecord,
    /// Directory part of the pathname; always ends in `/`.
    pub context_root: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

/// Parses a meeting URI, or returns `None` when there is no input.
///
/// ```
/// use roomuri_core::uri::parse_uri_string;
///
/// let rec = parse_uri_string(Some("https://meet.example.com/My:Room!")).unwrap();
/// assert_eq!(rec.room.as_deref(), Some("MyRoom"));
/// assert_eq!(rec.uri.pathname, "/MyRoom");
/// ```
pub fn parse_uri_string(uri: Option<&str>) -> Option<MeetingUriRecord> {
    let mut record = parse_standard_uri(&fix_scheme(uri?));

    let root_len = context_root(&record.pathname).len();
    let candidate = Some(&record.pathname[root_len..]).filter(|r| !r.is_empty());

    let mut room = candidate.map(str::to_string);
    if let Some(raw) = candidate {
        let fixed = sanitize_room_name(Some(raw)).unwrap_or_default();
        if fixed != raw {
            tracing::debug!(room = raw, sanitized = %fixed, "sanitized room name");
            record.pathname.truncate(root_len);
            record.pathname.push_str(&fixed);
            room = Some(fixed);
        }
    }

    let context_root = context_root(&record.pathname).to_string();
    Some(MeetingUriRecord {
        uri: record,
        context_root,
        room: room.filter(|r| !r.is_empty()),
    })
}
