//! Filesystem-safe path segments from catalog text.

/// Maximum number of characters kept from a catalog field before sanitizing.
pub const MAX_FIELD_CHARS: usize = 41;

/// Characters that are never allowed inside a single path segment.
const ILLEGAL_IN_SEGMENT: &[char] = &['\0', ':', '*', '?', '"', '<', '>', '|', '/', '\\'];

/// Keeps at most [`MAX_FIELD_CHARS`] characters of `field` and trims surrounding whitespace.
///
/// Counts characters, not bytes, so multi-byte text is never split mid-character.
pub fn truncate_field(field: &str) -> String {
    let head: String = field.chars().take(MAX_FIELD_CHARS).collect();
    head.trim().to_string()
}

/// Sanitizes text for use as one path segment.
///
/// - Replaces NUL, `:`, `*`, `?`, `"`, `<`, `>`, `|`, `/` and `\` with a space
/// - Trims leading/trailing whitespace
/// - Replaces every non-ASCII character with `_`
///
/// Never fails; the result may be empty.
pub fn sanitize_segment(text: &str) -> String {
    let replaced: String = text
        .chars()
        .map(|c| if ILLEGAL_IN_SEGMENT.contains(&c) { ' ' } else { c })
        .collect();

    replaced
        .trim()
        .chars()
        .map(|c| if c.is_ascii() { c } else { '_' })
        .collect()
}

/// Truncates a catalog field and sanitizes it into one path segment.
pub fn field_segment(field: &str) -> String {
    sanitize_segment(&truncate_field(field))
}

/// Sanitizes a relative path (e.g. an archive entry name) segment by segment.
///
/// Both `/` and `\` split segments. Empty, `.` and `..` segments are dropped, so
/// the result can never climb out of the directory it is joined onto. Returns
/// `None` when nothing usable remains.
pub fn sanitize_relative_path(path: &str) -> Option<String> {
    let segments: Vec<String> = path
        .split(['/', '\\'])
        .map(sanitize_segment)
        .filter(|s| !s.is_empty() && s != "." && s != "..")
        .collect();

    if segments.is_empty() {
        None
    } else {
        Some(segments.join("/"))
    }
}
