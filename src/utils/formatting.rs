//! Formatting utilities used for timeline and time-off listings.

use unicode_width::UnicodeWidthStr;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Pad on the right to `width` terminal columns (CJK glyphs count double).
pub fn pad_right(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    if w >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - w))
    }
}

/// Wrap `text` to `width` columns, indenting continuation lines by `indent`.
pub fn wrap_indented(text: &str, width: usize, indent: usize) -> String {
    let pad = " ".repeat(indent);
    let options = textwrap::Options::new(width.max(indent + 10))
        .initial_indent(&pad)
        .subsequent_indent(&pad);
    textwrap::fill(text, options)
}

/// `Some` value or a dash placeholder.
pub fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}
