//! Generic utilities used across core modules.

/// Max characters kept in a diagnostic preview of a raw payload.
pub const PREVIEW_CHARS: usize = 200;

/// First `max_chars` characters of `s`. Never splits a code point.
pub fn bounded_preview(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
