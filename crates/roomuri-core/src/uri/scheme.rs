//! Scheme scanning and fixing.

/// Length of the scheme (including the trailing `:`) at the start of `s`.
///
/// Grammar: a letter, then letters/digits/`.`/`+`/`-`, then `:`.
pub(crate) fn scan_scheme(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    if !bytes.first()?.is_ascii_alphabetic() {
        return None;
    }
    let mut i = 1;
    while let Some(&b) = bytes.get(i) {
        match b {
            b':' => return Some(i + 1),
            b if b.is_ascii_alphanumeric() || b == b'.' || b == b'+' || b == b'-' => i += 1,
            _ => return None,
        }
    }
    None
}

/// Normalizes the leading scheme(s) of `uri` to `http:` or `https:`.
///
/// Chained schemes (`org.example.app:https://...`) collapse to the last one.
/// Anything other than `http:`/`https:` becomes `https:`. The scheme is kept
/// only when an authority (`//`) follows; a bare room name such as
/// `app:room` loses it entirely.
pub fn fix_scheme(uri: &str) -> String {
    let mut rest = uri;
    let mut last = None;
    while let Some(len) = scan_scheme(rest) {
        last = Some(&rest[..len]);
        rest = &rest[len..];
    }

    let Some(last) = last else {
        return uri.to_string();
    };

    let mut protocol = last.to_ascii_lowercase();
    if protocol != "http:" && protocol != "https:" {
        tracing::debug!(scheme = %protocol, "rewriting scheme to https:");
        protocol = "https:".to_string();
    }

    if rest.starts_with("//") {
        protocol + rest
    } else {
        rest.to_string()
    }
}
