//! Boilerplate stripping for downloaded books
//!
//! Project Gutenberg texts wrap the actual book in a licensing preamble and
//! postamble delimited by fixed marker lines. `strip` cuts the text down to
//! the span between those markers so the front and back matter never reach
//! the word counter.

/// Strip leading and trailing boilerplate delimited by the given markers.
///
/// The start trim applies first: output begins on the line after the one
/// containing `start_marker`. The end trim then cuts immediately before the
/// `end_marker` occurrence. Marker matching is ASCII-case-insensitive. A text
/// without markers passes through unchanged; empty or whitespace-only input
/// yields an empty result.
pub fn strip<'a>(text: &'a str, start_marker: &str, end_marker: &str) -> &'a str {
    if text.trim().is_empty() {
        return "";
    }

    let mut text = text;

    if let Some(start) = find_ignore_ascii_case(text, start_marker) {
        // Keep the text untouched when the marker line has no following line.
        if let Some(line_end) = text[start..].find('\n').map(|offset| start + offset) {
            if line_end + 1 < text.len() {
                text = &text[line_end + 1..];
            }
        }
    }

    if let Some(end) = find_ignore_ascii_case(text, end_marker) {
        text = &text[..end];
    }

    text
}

/// Byte-wise ASCII-case-insensitive substring search.
///
/// Returned offsets are always char boundaries: a match can only begin on a
/// byte that equals the needle's leading byte, never on a UTF-8 continuation
/// byte.
fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "*** START OF";
    const END: &str = "*** END OF";

    #[test]
    fn strips_header_and_footer() {
        let text = "Preamble\n*** START OF FOO ***\nBody text\n*** END OF FOO ***\nLicense";
        assert_eq!(strip(text, START, END), "Body text\n");
    }

    #[test]
    fn passes_through_without_markers() {
        let text = "Just a plain paragraph.\nNothing to trim here.";
        assert_eq!(strip(text, START, END), text);
    }

    #[test]
    fn empty_and_whitespace_input_yield_empty() {
        assert_eq!(strip("", START, END), "");
        assert_eq!(strip("   \n\t  ", START, END), "");
    }

    #[test]
    fn markers_match_case_insensitively() {
        let text = "junk\n*** start of the ebook ***\nreal words\n*** End Of the ebook ***\nmore junk";
        assert_eq!(strip(text, START, END), "real words\n");
    }

    #[test]
    fn start_marker_on_last_line_keeps_text() {
        let text = "words before\n*** START OF THE EBOOK ***";
        assert_eq!(strip(text, START, END), text);
    }

    #[test]
    fn start_marker_line_ending_the_input_keeps_text() {
        // The newline after the marker is the final character.
        let text = "words before\n*** START OF THE EBOOK ***\n";
        assert_eq!(strip(text, START, END), text);
    }

    #[test]
    fn end_trim_applies_to_start_trimmed_text() {
        let text = "*** END OF early noise ***\n*** START OF FOO ***\nkept\n*** END OF FOO ***\ntail";
        assert_eq!(strip(text, START, END), "kept\n");
    }

    #[test]
    fn only_end_marker_truncates() {
        let text = "kept words\n*** END OF FOO ***\ndropped license";
        assert_eq!(strip(text, START, END), "kept words\n");
    }

    #[test]
    fn custom_markers() {
        let text = "intro\nBEGIN BODY here\ncontent line\nEND BODY\noutro";
        assert_eq!(strip(text, "BEGIN BODY", "END BODY"), "content line\n");
    }
}
