//! Canonical form for process output
//!
//! Applied to stdout, stderr and expected test output before any comparison.

/// Clean raw process output.
///
/// Drops ASCII control characters other than `\t`, `\n` and `\r`, folds
/// `\r\n` and lone `\r` into `\n`, then trims surrounding whitespace.
pub fn clean(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().filter(|c| !is_stripped_control(*c)).peekable();

    while let Some(ch) = chars.next() {
        if ch == '\r' {
            if chars.peek() == Some(&'\n') {
                chars.next();
            }
            out.push('\n');
        } else {
            out.push(ch);
        }
    }

    out.trim().to_string()
}

/// Lossy UTF-8 decode followed by `clean`.
pub fn clean_bytes(raw: &[u8]) -> String {
    clean(&String::from_utf8_lossy(raw))
}

fn is_stripped_control(ch: char) -> bool {
    matches!(ch, '\u{00}'..='\u{08}' | '\u{0B}' | '\u{0C}' | '\u{0E}'..='\u{1F}' | '\u{7F}')
}
