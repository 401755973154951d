//! Terminal output sanitization.
//!
//! Prompts and generated code come from users and from a remote backend, so
//! both are stripped of escape sequences and control characters before they
//! reach the terminal.

/// Strips ANSI CSI escape sequences and control characters (except tab, newline, CR)
///
/// # Examples
///
/// ```
/// use code_copilot::utils::terminal::strip_ansi_codes;
///
/// let text = "\x1b[31mRed text\x1b[0m";
/// assert_eq!(strip_ansi_codes(text), "Red text");
/// ```
pub fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            // CSI sequences end at the first letter
            for next_ch in chars.by_ref() {
                if next_ch.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }

        if ch.is_control() && ch != '\t' && ch != '\n' && ch != '\r' {
            continue;
        }

        result.push(ch);
    }

    result
}

/// Sanitized single-line preview of `text`, at most `max_chars` characters.
///
/// Whitespace runs (including newlines) collapse to one space; a truncated
/// preview ends with `...`.
pub fn preview_line(text: &str, max_chars: usize) -> String {
    let clean = strip_ansi_codes(text);
    let collapsed = clean.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }

    let keep = max_chars.saturating_sub(3);
    let mut preview: String = collapsed.chars().take(keep).collect();
    preview.push_str("...");
    preview
}
