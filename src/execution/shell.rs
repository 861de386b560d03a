//! Shell quoting for untrusted text

/// Wrap `text` in single quotes so `/bin/sh` reads it back as one literal word.
///
/// Inside single quotes the shell interprets nothing, so the only character
/// that needs care is `'` itself: it closes the quote, emits an escaped quote,
/// and reopens (`'` → `'\''`).
pub fn single_quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('\'');
    for ch in text.chars() {
        if ch == '\'' {
            quoted.push_str("'\\''");
        } else {
            quoted.push(ch);
        }
    }
    quoted.push('\'');
    quoted
}

/// Shell fragment that writes `text` to stdout byte for byte, followed by a newline.
///
/// `printf '%s\n'` is used instead of `echo` because the `echo` built into
/// dash (the `/bin/sh` of Debian based images) expands backslash sequences.
pub fn print_literal(text: &str) -> String {
    format!("printf '%s\\n' {}", single_quote(text))
}
