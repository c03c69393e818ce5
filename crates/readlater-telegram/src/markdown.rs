//! Telegram legacy Markdown helpers.

/// Escape the characters that break Telegram's legacy Markdown parser.
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '_' | '*' | '`' | '[' | ']') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_markup_characters() {
        assert_eq!(
            escape_markdown("snake_case *bold* `code` [link]"),
            r"snake\_case \*bold\* \`code\` \[link\]"
        );
    }

    #[test]
    fn test_leaves_plain_text_alone() {
        assert_eq!(escape_markdown("Video to watch (2h) ✓"), "Video to watch (2h) ✓");
    }
}
