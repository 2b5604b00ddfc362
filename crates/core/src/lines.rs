//! Heuristic display-line estimation.
//!
//! There is no layout pass: a slide line is assumed to hold a fixed number of
//! characters, and a fragment's size is its trimmed length divided by that.

/// Characters assumed to fit on one slide line.
pub const CHARS_PER_LINE: usize = 80;

/// Estimate how many slide lines `text` occupies at [`CHARS_PER_LINE`].
///
/// Whitespace-only text yields 0.
pub fn estimate_lines(text: &str) -> usize {
    estimate_lines_with(text, CHARS_PER_LINE)
}

/// Estimate how many slide lines `text` occupies at a custom line width.
///
/// A width of 0 is treated as 1.
pub fn estimate_lines_with(text: &str, chars_per_line: usize) -> usize {
    let length = trim_text(text).chars().count();
    length.div_ceil(chars_per_line.max(1))
}

/// Trim surrounding whitespace the way JavaScript `String.prototype.trim`
/// does: Unicode whitespace and the byte-order mark, but not NEL (U+0085).
pub fn trim_text(text: &str) -> &str {
    text.trim_matches(|c: char| c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}'))
}
