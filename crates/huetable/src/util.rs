//! Display-width helpers shared by the formatter and the renderers.
//!
//! Widths are measured in terminal columns with `unicode-width`, so CJK text
//! counts two columns per glyph. For ASCII text the width equals the number of
//! characters.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Returns the display width of `s` in terminal columns.
///
/// # Example
///
/// ```rust
/// use huetable::display_width;
///
/// assert_eq!(display_width("hello"), 5);
/// assert_eq!(display_width("日本"), 4);
/// ```
pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Returns the longest prefix of `s` whose display width fits in `max_width`.
pub(crate) fn take_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if current + w > max_width {
            break;
        }
        result.push(c);
        current += w;
    }
    result
}

/// Pads `s` with trailing spaces up to `width` display columns.
///
/// Strings already at or beyond `width` are returned unchanged.
pub fn pad_right(s: &str, width: usize) -> String {
    let current = display_width(s);
    if current >= width {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len() + width - current);
    out.push_str(s);
    out.extend(std::iter::repeat_n(' ', width - current));
    out
}
