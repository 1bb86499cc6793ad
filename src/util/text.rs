use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Number of terminal columns `s` occupies (CJK and emoji count as 2).
///
/// ```
/// use search_injector::util::display_width;
///
/// assert_eq!(display_width("cats"), 4);
/// assert_eq!(display_width("日本"), 4);
/// ```
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;

/// Truncate `s` to at most `max_width` columns, ending in "..." when cut.
///
/// Widths of 3 or less are too narrow for an ellipsis; the text is simply cut.
///
/// ```
/// use search_injector::util::truncate_to_width;
///
/// assert_eq!(truncate_to_width("Link copied", 20), "Link copied");
/// assert_eq!(truncate_to_width("Link copied to clipboard!", 10), "Link co...");
/// ```
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }
    if max_width <= ELLIPSIS_WIDTH {
        return Cow::Owned(take_columns(s, max_width).to_string());
    }
    let head = take_columns(s, max_width - ELLIPSIS_WIDTH);
    Cow::Owned(format!("{}{}", head, ELLIPSIS))
}

/// Keep the end of `s` that fits in `max_width` columns.
///
/// Used for single-line input fields, where the cursor sits at the end and
/// the most recently typed text must stay visible.
///
/// ```
/// use search_injector::util::tail_to_width;
///
/// assert_eq!(tail_to_width("https://example.com", 7), "ple.com");
/// assert_eq!(tail_to_width("short", 10), "short");
/// ```
pub fn tail_to_width(s: &str, max_width: usize) -> &str {
    let mut width = 0;
    let mut start = s.len();
    for (idx, c) in s.char_indices().rev() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if width + w > max_width {
            break;
        }
        width += w;
        start = idx;
    }
    &s[start..]
}

/// Longest prefix of `s` that fits in `max_width` columns.
fn take_columns(s: &str, max_width: usize) -> &str {
    let mut width = 0;
    for (idx, c) in s.char_indices() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if width + w > max_width {
            return &s[..idx];
        }
        width += w;
    }
    s
}

fn is_stripped_control(c: char) -> bool {
    c == '\u{7f}' || (c < ' ' && !matches!(c, '\t' | '\n' | '\r'))
}

/// Strip ANSI escape sequences and control characters, keeping tab, LF and CR.
///
/// Removes CSI (`ESC [ ... final`), OSC (`ESC ] ... BEL|ESC \`), bare ESC,
/// and the C0 controls plus DEL. Returns `Cow::Borrowed` for clean input.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    if !s.chars().any(is_stripped_control) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\u{1b}' {
            if !is_stripped_control(c) {
                out.push(c);
            }
            continue;
        }

        match chars.peek() {
            Some('[') => {
                chars.next();
                // Parameters and intermediates run until a final byte in 0x40..=0x7e
                for c in chars.by_ref() {
                    if ('\u{40}'..='\u{7e}').contains(&c) {
                        break;
                    }
                }
            }
            Some(']') => {
                chars.next();
                while let Some(c) = chars.next() {
                    if c == '\u{7}' {
                        break;
                    }
                    if c == '\u{1b}' && chars.peek() == Some(&'\\') {
                        chars.next();
                        break;
                    }
                }
            }
            _ => {}
        }
    }

    Cow::Owned(out)
}

const LINE_BREAKS: &[char] = &['\t', '\n', '\r'];

/// Clean text headed for a single-line form field: escape sequences and
/// control characters are removed, tabs and line breaks become spaces.
pub fn sanitize_field_input(s: &str) -> Cow<'_, str> {
    let stripped = strip_control_chars(s);
    if !stripped.contains(LINE_BREAKS) {
        return stripped;
    }
    Cow::Owned(
        stripped
            .replace("\r\n", " ")
            .replace(LINE_BREAKS, " "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncation() {
        assert_eq!(truncate_to_width("Hello World", 8), "Hello...");
        assert_eq!(truncate_to_width("Short", 10), "Short");
        assert_eq!(truncate_to_width("Test", 0), "");
        assert_eq!(truncate_to_width("Testing", 3), "Tes");
    }

    #[test]
    fn test_cjk_truncation() {
        // 8 columns, budget 7 leaves 4 columns before the ellipsis
        assert_eq!(truncate_to_width("你好世界", 7), "你好...");
    }

    #[test]
    fn test_truncate_borrows_when_fits() {
        assert!(matches!(truncate_to_width("fits", 4), Cow::Borrowed(_)));
    }

    #[test]
    fn test_tail_keeps_end() {
        assert_eq!(tail_to_width("abcdef", 3), "def");
        assert_eq!(tail_to_width("abc", 0), "");
        // A wide char that does not fit is dropped entirely
        assert_eq!(tail_to_width("a你好", 3), "好");
    }

    #[test]
    fn test_strip_clean_input_borrows() {
        assert!(matches!(strip_control_chars("plain text"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_strip_csi_and_osc() {
        assert_eq!(strip_control_chars("\x1b[31mred\x1b[0m"), "red");
        assert_eq!(strip_control_chars("\x1b]0;title\x07body"), "body");
        assert_eq!(strip_control_chars("\x1b]8;;http://x\x1b\\link"), "link");
    }

    #[test]
    fn test_strip_keeps_whitespace_controls() {
        assert_eq!(strip_control_chars("a\tb\nc\x00d\x7f"), "a\tb\ncd");
    }

    #[test]
    fn test_sanitize_field_input() {
        assert_eq!(sanitize_field_input("one\r\ntwo\tthree"), "one two three");
        assert_eq!(sanitize_field_input("\x1b[1mbold\x1b[0m"), "bold");
        assert!(matches!(sanitize_field_input("cats"), Cow::Borrowed(_)));
    }
}
