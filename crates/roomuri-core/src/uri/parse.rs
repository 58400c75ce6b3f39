//! Structural URI parser modeled on the browser `Location` fields.

use std::fmt;

use serde::Serialize;

use super::scheme::scan_scheme;

/// A URI split into `Location`-style components.
///
/// `pathname` always starts with `/`; `search` and `hash` are empty strings
/// (never absent) when the URI has no query or fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UriRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    /// `hostname[:port]`, user-info removed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    pub pathname: String,
    pub search: String,
    pub hash: String,
}

impl Default for UriRecord {
    fn default() -> Self {
        Self {
            protocol: None,
            host: None,
            hostname: None,
            port: None,
            pathname: "/".to_string(),
            search: String::new(),
            hash: String::new(),
        }
    }
}

impl fmt::Display for UriRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_uri(self))
    }
}

/// Cursor over the remaining unparsed input.
struct Scanner<'a> {
    rest: &'a str,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self { rest: input }
    }

    /// Consumes up to (not including) the first byte in `stops`.
    fn take_until(&mut self, stops: &[u8]) -> &'a str {
        let end = self
            .rest
            .bytes()
            .position(|b| stops.contains(&b))
            .unwrap_or(self.rest.len());
        let (head, tail) = self.rest.split_at(end);
        self.rest = tail;
        head
    }

    fn protocol(&mut self) -> Option<String> {
        let len = scan_scheme(self.rest)?;
        let (scheme, tail) = self.rest.split_at(len);
        self.rest = tail;
        Some(scheme.to_ascii_lowercase())
    }

    /// Raw authority without the leading `//`; requires at least one byte.
    fn authority(&mut self) -> Option<&'a str> {
        let after = self.rest.strip_prefix("//")?;
        let end = after
            .bytes()
            .position(|b| matches!(b, b'/' | b'?' | b'#'))
            .unwrap_or(after.len());
        if end == 0 {
            return None;
        }
        let (authority, tail) = after.split_at(end);
        self.rest = tail;
        Some(authority)
    }

    fn pathname(&mut self) -> String {
        let path = self.take_until(b"?#");
        if path.is_empty() {
            "/".to_string()
        } else if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        }
    }

    fn search(&mut self) -> String {
        if !self.rest.starts_with('?') {
            return String::new();
        }
        self.take_until(b"#").to_string()
    }

    fn hash(self) -> String {
        if self.rest.starts_with('#') {
            self.rest.to_string()
        } else {
            String::new()
        }
    }
}

/// Parses `input` into a [`UriRecord`]. Never fails.
///
/// Whitespace is removed first: a URI never carries unencoded whitespace.
///
/// ```
/// use roomuri_core::uri::parse_standard_uri;
///
/// let rec = parse_standard_uri("https://meet.example.com/foo/bar?x=1#hash");
/// assert_eq!(rec.protocol.as_deref(), Some("https:"));
/// assert_eq!(rec.host.as_deref(), Some("meet.example.com"));
/// assert_eq!(rec.pathname, "/foo/bar");
/// assert_eq!(rec.search, "?x=1");
/// assert_eq!(rec.hash, "#hash");
/// ```
pub fn parse_standard_uri(input: &str) -> UriRecord {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let mut scanner = Scanner::new(&compact);
    let mut record = UriRecord::default();

    record.protocol = scanner.protocol();

    if let Some(authority) = scanner.authority() {
        let host = match authority.find('@') {
            Some(at) => &authority[at + 1..],
            None => authority,
        };
        let hostname = match host.rfind(':') {
            Some(colon) => {
                record.port = Some(host[colon + 1..].to_string());
                &host[..colon]
            }
            None => host,
        };
        record.host = Some(host.to_string());
        record.hostname = Some(hostname.to_string());
    }

    record.pathname = scanner.pathname();
    record.search = scanner.search();
    record.hash = scanner.hash();
    record
}

/// Reassembles a record: `protocol` + `//host` + `pathname` + `search` + `hash`.
///
/// The `//` separator is emitted only when a host is present.
pub fn render_uri(record: &UriRecord) -> String {
    let mut out = String::new();
    if let Some(protocol) = record.protocol.as_deref() {
        out.push_str(protocol);
    }
    if let Some(host) = record.host.as_deref().filter(|h| !h.is_empty()) {
        out.push_str("//");
        out.push_str(host);
    }
    if record.pathname.is_empty() {
        out.push('/');
    } else {
        out.push_str(&record.pathname);
    }
    out.push_str(&record.search);
    out.push_str(&record.hash);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_uri() {
        let rec = parse_standard_uri("https://meet.example.com/foo/bar?x=1#hash");
        assert_eq!(rec.protocol.as_deref(), Some("https:"));
        assert_eq!(rec.host.as_deref(), Some("meet.example.com"));
        assert_eq!(rec.hostname.as_deref(), Some("meet.example.com"));
        assert_eq!(rec.port, None);
        assert_eq!(rec.pathname, "/foo/bar");
        assert_eq!(rec.search, "?x=1");
        assert_eq!(rec.hash, "#hash");
    }

    #[test]
    fn port_and_userinfo() {
        let rec = parse_standard_uri("https://user:pw@meet.example.com:8443/room");
        assert_eq!(rec.host.as_deref(), Some("meet.example.com:8443"));
        assert_eq!(rec.hostname.as_deref(), Some("meet.example.com"));
        assert_eq!(rec.port.as_deref(), Some("8443"));
        assert_eq!(rec.pathname, "/room");
        assert_eq!(rec.to_string(), "https://meet.example.com:8443/room");
    }

    #[test]
    fn bare_room_name() {
        let rec = parse_standard_uri("myroom");
        assert_eq!(rec.protocol, None);
        assert_eq!(rec.host, None);
        assert_eq!(rec.pathname, "/myroom");
        assert_eq!(rec.search, "");
        assert_eq!(rec.hash, "");
        assert_eq!(render_uri(&rec), "/myroom");
    }

    #[test]
    fn empty_input_defaults() {
        let rec = parse_standard_uri("");
        assert_eq!(rec, UriRecord::default());
        assert_eq!(render_uri(&rec), "/");
    }

    #[test]
    fn empty_authority_is_path() {
        let rec = parse_standard_uri("https:///room");
        assert_eq!(rec.host, None);
        assert_eq!(rec.pathname, "///room");
    }

    #[test]
    fn authority_without_path() {
        let rec = parse_standard_uri("https://meet.example.com?jwt=t#a=1");
        assert_eq!(rec.host.as_deref(), Some("meet.example.com"));
        assert_eq!(rec.pathname, "/");
        assert_eq!(rec.search, "?jwt=t");
        assert_eq!(rec.hash, "#a=1");
    }

    #[test]
    fn hash_before_question_mark() {
        let rec = parse_standard_uri("/room#frag?notquery");
        assert_eq!(rec.search, "");
        assert_eq!(rec.hash, "#frag?notquery");
    }

    #[test]
    fn strips_whitespace() {
        let rec = parse_standard_uri(" https://meet.example.com/ my room \n");
        assert_eq!(rec.pathname, "/myroom");
    }

    #[test]
    fn empty_port_kept() {
        let rec = parse_standard_uri("https://meet.example.com:/r");
        assert_eq!(rec.port.as_deref(), Some(""));
        assert_eq!(rec.hostname.as_deref(), Some("meet.example.com"));
    }

    #[test]
    fn ipv6_hostname_keeps_its_colons() {
        let rec = parse_standard_uri("https://[::1]:8443/r");
        assert_eq!(rec.host.as_deref(), Some("[::1]:8443"));
        assert_eq!(rec.hostname.as_deref(), Some("[::1]"));
        assert_eq!(rec.port.as_deref(), Some("8443"));
    }

    #[test]
    fn canonical_round_trip() {
        for s in [
            "https://meet.example.com/foo/bar?x=1#hash",
            "http://localhost:8080/room?jwt=abc&lang=en#config.a=1",
            "https://meet.example.com/",
        ] {
            assert_eq!(parse_standard_uri(s).to_string(), s);
        }
    }

    #[test]
    fn serializes_camel_case_without_absent_fields() {
        let rec = parse_standard_uri("/room");
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "pathname": "/room", "search": "", "hash": "" })
        );
    }
}
