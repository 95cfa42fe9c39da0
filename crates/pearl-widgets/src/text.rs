//! Display-width helpers built on `unicode-width`.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Number of terminal columns `s` occupies.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Cut `s` to at most `max_width` columns, appending `tail` when something
/// was removed. The result including the tail never exceeds `max_width`.
///
/// ```
/// use pearl_widgets::text::truncate;
///
/// assert_eq!(truncate("Liechtenstein", 8, "…"), "Liechte…");
/// assert_eq!(truncate("Peru", 8, "…"), "Peru");
/// ```
pub fn truncate(s: &str, max_width: usize, tail: &str) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    let tail_width = display_width(tail);
    if tail_width > max_width {
        return take_columns(tail, max_width);
    }
    let mut out = take_columns(s, max_width - tail_width);
    out.push_str(tail);
    out
}

fn take_columns(s: &str, columns: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let cw = c.width().unwrap_or(0);
        if used + cw > columns {
            break;
        }
        out.push(c);
        used += cw;
    }
    out
}

/// Whether `s` is empty or only whitespace.
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_characters_count_double() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("日本"), 4);
    }

    #[test]
    fn truncate_respects_wide_chars() {
        assert_eq!(truncate("日本語テキスト", 7, "…"), "日本語…");
    }

    #[test]
    fn truncate_tail_wider_than_space() {
        assert_eq!(truncate("abcdef", 2, "..."), "..");
    }

    #[test]
    fn blank_detection() {
        assert!(is_blank(""));
        assert!(is_blank("  \t"));
        assert!(!is_blank(" a "));
    }
}
