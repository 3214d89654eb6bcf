// src/util/text.rs

/// True when the text has nothing but whitespace in it.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Shorten text to at most `max_chars` characters, marking the cut with `...`.
///
/// Counts characters, not bytes, so multi-byte text is never split mid-character.
///
/// # Examples
///
/// ```
/// use comment_board::util::text::excerpt;
///
/// assert_eq!(excerpt("short", 75), "short");
/// assert_eq!(excerpt("abcdef", 3), "abc...");
/// ```
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let first_line = text.lines().next().unwrap_or("").trim_end();
    let truncated: String = first_line.chars().take(max_chars).collect();
    if first_line.chars().count() > max_chars || text.trim_end().contains('\n') {
        format!("{truncated}...")
    } else {
        truncated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", true)]
    #[case("   ", true)]
    #[case("\t\n", true)]
    #[case(" a ", false)]
    fn given_text_when_checking_blank_then_ignores_whitespace(#[case] text: &str, #[case] blank: bool) {
        assert_eq!(is_blank(text), blank);
    }

    #[test]
    fn given_text_within_limit_when_excerpting_then_returns_unchanged() {
        assert_eq!(excerpt("What a nice day", 75), "What a nice day");
    }

    #[test]
    fn given_long_text_when_excerpting_then_cuts_and_marks() {
        let text = "x".repeat(80);
        assert_eq!(excerpt(&text, 75), format!("{}...", "x".repeat(75)));
    }

    #[test]
    fn given_multibyte_text_when_excerpting_then_counts_characters() {
        assert_eq!(excerpt("héllo wörld", 5), "héllo...");
    }

    #[test]
    fn given_multiline_text_when_excerpting_then_keeps_first_line() {
        assert_eq!(excerpt("first\nsecond", 75), "first...");
    }

    #[test]
    fn given_trailing_newline_when_excerpting_then_no_marker() {
        assert_eq!(excerpt("first\n", 75), "first");
    }
}
