//! Text measurement and wrapping.
//!
//! Widths are display columns, not chars or bytes - wide glyphs count as two
//! columns via `unicode-width`.

use unicode_width::UnicodeWidthStr;

/// Display width of a string in terminal columns.
pub fn string_width(s: &str) -> u16 {
    UnicodeWidthStr::width(s) as u16
}

/// Truncate a string to at most `max` columns, appending `…` if cut.
pub fn truncate_text(s: &str, max: u16) -> String {
    if string_width(s) <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut width = 0u16;
    for ch in s.chars() {
        let ch_width = string_width(&ch.to_string());
        if width + ch_width > max.saturating_sub(1) {
            break;
        }
        out.push(ch);
        width += ch_width;
    }
    out.push('…');
    out
}

/// Greedy word wrap to `max` columns.
///
/// Words longer than `max` are split hard. Blank input yields one empty line.
pub fn wrap_text(s: &str, max: u16) -> Vec<String> {
    if max == 0 {
        return vec![String::new()];
    }

    let mut lines = Vec::new();
    for paragraph in s.split('\n') {
        let mut line = String::new();
        let mut line_width = 0u16;

        for word in paragraph.split_whitespace() {
            let word_width = string_width(word);

            if word_width > max {
                // Hard-split oversized word
                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                    line_width = 0;
                }
                let mut chunk = String::new();
                let mut chunk_width = 0u16;
                for ch in word.chars() {
                    let ch_width = string_width(&ch.to_string());
                    if chunk_width + ch_width > max {
                        lines.push(std::mem::take(&mut chunk));
                        chunk_width = 0;
                    }
                    chunk.push(ch);
                    chunk_width += ch_width;
                }
                line = chunk;
                line_width = chunk_width;
                continue;
            }

            let sep = if line.is_empty() { 0 } else { 1 };
            if line_width + sep + word_width > max {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            }
            if !line.is_empty() {
                line.push(' ');
                line_width += 1;
            }
            line.push_str(word);
            line_width += word_width;
        }

        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_width_ascii() {
        assert_eq!(string_width(""), 0);
        assert_eq!(string_width("hello"), 5);
    }

    #[test]
    fn test_string_width_wide() {
        assert_eq!(string_width("世界"), 4);
    }

    #[test]
    fn test_truncate_short_unchanged() {
        assert_eq!(truncate_text("abc", 5), "abc");
        assert_eq!(truncate_text("abc", 3), "abc");
    }

    #[test]
    fn test_truncate_appends_ellipsis() {
        assert_eq!(truncate_text("abcdef", 4), "abc…");
        assert_eq!(truncate_text("abcdef", 0), "");
    }

    #[test]
    fn test_wrap_basic() {
        let lines = wrap_text("the quick brown fox", 10);
        assert_eq!(lines, vec!["the quick", "brown fox"]);
    }

    #[test]
    fn test_wrap_preserves_paragraphs() {
        let lines = wrap_text("one\ntwo", 10);
        assert_eq!(lines, vec!["one", "two"]);
    }

    #[test]
    fn test_wrap_hard_splits_long_word() {
        let lines = wrap_text("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_empty() {
        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }
}
