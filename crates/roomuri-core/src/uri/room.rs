//! Room-name sanitization and context-root extraction.

/// Characters that neither clients nor servers accept in a room name.
const ROOM_EXCLUDED: &[char] = &[
    ':', '?', '#', '[', ']', '@', '!', '$', '&', '\'', '(', ')', '*', '+', ',', ';', '=', '>',
    '<', '/', '"',
];

/// Removes every excluded character from `room`.
///
/// `None` and the empty string pass through unchanged.
pub fn sanitize_room_name(room: Option<&str>) -> Option<String> {
    room.map(|r| r.chars().filter(|c| !ROOM_EXCLUDED.contains(c)).collect())
}

/// Everything in `pathname` up to and including the last `/`, or `/`.
pub fn context_root(pathname: &str) -> &str {
    match pathname.rfind('/') {
        Some(idx) => &pathname[..=idx],
        None => "/",
    }
}
