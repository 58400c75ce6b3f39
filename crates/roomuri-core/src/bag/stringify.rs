//! Property bag → canonical URI string.

use url::Url;

use super::{append_override_block, encode_params, Diagnostic, ResolvedFields, UrlPropertyBag};
use crate::uri::{fix_scheme, parse_standard_uri, render_uri, UriRecord};
use crate::UriError;

/// Builds one URI string out of `bag`, or `None` when nothing is left.
///
/// Encoding problems in the override maps are logged and the offending keys
/// dropped; see [`url_object_to_string_with_diagnostics`] to collect them.
///
/// ```
/// use roomuri_core::bag::{url_object_to_string, UrlPropertyBag};
///
/// let bag = UrlPropertyBag {
///     server_url: Some("https://meet.example.com/".into()),
///     room: Some("team-sync".into()),
///     ..Default::default()
/// };
/// assert_eq!(
///     url_object_to_string(&bag).unwrap().as_deref(),
///     Some("https://meet.example.com/team-sync")
/// );
/// ```
pub fn url_object_to_string(bag: &UrlPropertyBag) -> Result<Option<String>, UriError> {
    let (url, diagnostics) = url_object_to_string_with_diagnostics(bag)?;
    for d in &diagnostics {
        tracing::warn!(namespace = %d.namespace, key = %d.key, "{d}");
    }
    Ok(url)
}

/// Like [`url_object_to_string`], returning the skipped keys instead of
/// logging them.
pub fn url_object_to_string_with_diagnostics(
    bag: &UrlPropertyBag,
) -> Result<(Option<String>, Vec<Diagnostic>), UriError> {
    let fields = ResolvedFields::from_bag(bag);
    let mut url = parse_standard_uri(&fix_scheme(&base_string(&fields)?));

    if url.protocol.is_none() {
        url.protocol = fields.protocol.map(with_colon);
    }

    let mut pathname = url.pathname.clone();

    if url.host.as_deref().map_or(true, str::is_empty) {
        if let (Some(domain), Some(app_link_scheme)) = (fields.domain, fields.app_link_scheme) {
            let authority = domain_authority(app_link_scheme, domain);
            if authority.host.as_deref().is_some_and(|h| !h.is_empty()) {
                url.host = authority.host;
                url.hostname = authority.hostname;
                url.port = authority.port;
            }
            // The domain may carry a tenant path.
            if pathname == "/" && authority.pathname != "/" {
                pathname = authority.pathname;
            }
        }
    }

    if let Some(room) = fields.room_name {
        if url.pathname.ends_with('/') || !url.pathname.ends_with(&format!("/{room}")) {
            if !pathname.ends_with('/') {
                pathname.push('/');
            }
            pathname.push_str(room);
        }
    }
    url.pathname = pathname;

    if let Some(jwt) = fields.jwt {
        append_jwt(&mut url.search, jwt);
    }

    let mut diagnostics = Vec::new();
    for (namespace, overrides) in &fields.overrides {
        let namespace = namespace.as_str();
        let params = encode_params(namespace, *overrides, &mut diagnostics);
        append_override_block(&mut url.hash, namespace, &params);
    }

    let rendered = render_uri(&url);
    Ok((Some(rendered).filter(|s| !s.is_empty()), diagnostics))
}

/// `serverURL` + `room` joined, else `room` alone, else `url`.
fn base_string(fields: &ResolvedFields<'_>) -> Result<String, UriError> {
    match (fields.server_url, fields.room) {
        (Some(server_url), Some(room)) => Url::parse(server_url)
            .and_then(|base| base.join(room))
            .map(String::from)
            .map_err(|source| UriError::Join {
                base: server_url.to_string(),
                reference: room.to_string(),
                source,
            }),
        (_, Some(room)) => Ok(room.to_string()),
        _ => Ok(fields.url.unwrap_or_default().to_string()),
    }
}

/// Reads `domain` as an authority (plus optional tenant path).
fn domain_authority(app_link_scheme: &str, domain: &str) -> UriRecord {
    parse_standard_uri(&fix_scheme(&format!(
        "{}//{domain}",
        with_colon(app_link_scheme)
    )))
}

fn with_colon(scheme: &str) -> String {
    if scheme.ends_with(':') {
        scheme.to_string()
    } else {
        format!("{scheme}:")
    }
}

/// Adds `jwt=<token>` unless the query already carries one.
fn append_jwt(search: &mut String, jwt: &str) {
    if search.contains("?jwt=") || search.contains("&jwt=") {
        return;
    }
    if !search.starts_with('?') {
        search.insert(0, '?');
    }
    if search.len() > 1 {
        search.push('&');
    }
    search.push_str("jwt=");
    search.push_str(jwt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stringify(value: serde_json::Value) -> Option<String> {
        url_object_to_string(&UrlPropertyBag::from_json(&value)).unwrap()
    }

    #[test]
    fn server_url_and_room() {
        assert_eq!(
            stringify(json!({ "serverURL": "https://meet.example.com/", "room": "team-sync" }))
                .as_deref(),
            Some("https://meet.example.com/team-sync")
        );
        assert_eq!(
            stringify(json!({ "serverURL": "https://meet.example.com", "room": "team-sync" }))
                .as_deref(),
            Some("https://meet.example.com/team-sync")
        );
    }

    #[test]
    fn room_join_replaces_last_segment() {
        assert_eq!(
            stringify(json!({ "serverURL": "https://meet.example.com/tenant/old", "room": "new" }))
                .as_deref(),
            Some("https://meet.example.com/tenant/new")
        );
    }

    #[test]
    fn invalid_server_url_fails() {
        let bag = UrlPropertyBag {
            server_url: Some("not a url".into()),
            room: Some("r".into()),
            ..Default::default()
        };
        assert!(matches!(
            url_object_to_string(&bag),
            Err(UriError::Join { .. })
        ));
    }

    #[test]
    fn room_only_ignores_url() {
        assert_eq!(
            stringify(json!({ "room": "r", "url": "https://other.example.com/x" })).as_deref(),
            Some("/r")
        );
    }

    #[test]
    fn url_only() {
        assert_eq!(
            stringify(json!({ "url": "org.jitsi.meet://meet.example.com/room" })).as_deref(),
            Some("https://meet.example.com/room")
        );
    }

    #[test]
    fn empty_bag_renders_root() {
        assert_eq!(stringify(json!({})).as_deref(), Some("/"));
    }

    #[test]
    fn protocol_from_scheme_gets_colon() {
        assert_eq!(
            stringify(json!({ "scheme": "http", "roomName": "r" })).as_deref(),
            Some("http:/r")
        );
        assert_eq!(
            stringify(json!({ "protocol": "https:", "url": "http://a.example.com/" })).as_deref(),
            Some("http://a.example.com/")
        );
    }

    #[test]
    fn domain_supplies_authority() {
        assert_eq!(
            stringify(json!({
                "domain": "meet.example.com:8443",
                "appLinkScheme": "org.jitsi.meet:",
                "scheme": "https",
                "roomName": "standup"
            }))
            .as_deref(),
            Some("https://meet.example.com:8443/standup")
        );
    }

    #[test]
    fn domain_without_protocol_is_scheme_relative() {
        assert_eq!(
            stringify(json!({
                "domain": "meet.example.com",
                "appLinkScheme": "org.jitsi.meet:",
                "roomName": "standup"
            }))
            .as_deref(),
            Some("//meet.example.com/standup")
        );
    }

    #[test]
    fn domain_tenant_path() {
        assert_eq!(
            stringify(json!({
                "hostname": "meet.example.com/tenant",
                "appLinkScheme": "org.jitsi.meet",
                "roomName": "standup"
            }))
            .as_deref(),
            Some("//meet.example.com/tenant/standup")
        );
    }

    #[test]
    fn domain_needs_app_link_scheme() {
        assert_eq!(
            stringify(json!({ "domain": "meet.example.com", "roomName": "r" })).as_deref(),
            Some("/r")
        );
    }

    #[test]
    fn domain_ignored_when_host_present() {
        assert_eq!(
            stringify(json!({
                "url": "https://a.example.com/x",
                "domain": "b.example.com",
                "appLinkScheme": "org.jitsi.meet:"
            }))
            .as_deref(),
            Some("https://a.example.com/x")
        );
    }

    #[test]
    fn room_not_duplicated() {
        assert_eq!(
            stringify(json!({ "url": "https://meet.example.com/r", "roomName": "r" })).as_deref(),
            Some("https://meet.example.com/r")
        );
        assert_eq!(
            stringify(json!({ "url": "https://meet.example.com/a", "roomName": "r" })).as_deref(),
            Some("https://meet.example.com/a/r")
        );
        assert_eq!(
            stringify(json!({ "url": "https://meet.example.com/t/", "roomName": "r" })).as_deref(),
            Some("https://meet.example.com/t/r")
        );
    }

    #[test]
    fn jwt_appended() {
        assert_eq!(stringify(json!({ "room": "r", "jwt": "abc" })).as_deref(), Some("/r?jwt=abc"));
        assert_eq!(
            stringify(json!({ "url": "https://m.example.com/r?lang=en", "jwt": "abc" })).as_deref(),
            Some("https://m.example.com/r?lang=en&jwt=abc")
        );
    }

    #[test]
    fn jwt_not_duplicated() {
        assert_eq!(
            stringify(json!({ "url": "https://m.example.com/r?a=1&jwt=old", "jwt": "new" }))
                .as_deref(),
            Some("https://m.example.com/r?a=1&jwt=old")
        );
    }

    #[test]
    fn jwt_with_bare_question_mark() {
        let mut search = "?".to_string();
        append_jwt(&mut search, "t");
        assert_eq!(search, "?jwt=t");
    }

    #[test]
    fn config_fragment() {
        let out = stringify(json!({ "room": "r", "config": { "startWithAudioMuted": true } }))
            .unwrap();
        let rec = parse_standard_uri(&out);
        assert_eq!(rec.hash, "#config.startWithAudioMuted=true");
    }

    #[test]
    fn all_namespaces_in_fixed_order() {
        let out = stringify(json!({
            "url": "https://m.example.com/r#existing=1",
            "devicesOverride": { "micDeviceId": "abc" },
            "interfaceConfig": { "SHOW_WATERMARK": false },
            "configOverwrite": { "a": 1, "b": [1, 2] },
            "config": { "ignored": true }
        }))
        .unwrap();
        assert_eq!(
            out,
            "https://m.example.com/r#existing=1\
             &config.a=1&config.b=%5B1%2C2%5D\
             &interfaceConfig.SHOW_WATERMARK=false\
             &devices.micDeviceId=%22abc%22"
        );
    }

    #[test]
    fn empty_override_map_emits_nothing() {
        assert_eq!(
            stringify(json!({ "room": "r", "configOverwrite": {}, "config": { "a": 1 } }))
                .as_deref(),
            Some("/r")
        );
    }

    #[test]
    fn diagnostics_empty_for_json_values() {
        let bag = UrlPropertyBag::from_json(&json!({ "room": "r", "config": { "a": null } }));
        let (url, diags) = url_object_to_string_with_diagnostics(&bag).unwrap();
        assert_eq!(url.as_deref(), Some("/r#config.a=null"));
        assert!(diags.is_empty());
    }
}
