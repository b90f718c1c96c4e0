//! Shell-safe quoting for the two nested shell contexts.
//!
//! Paths reach the device through two interpreters: the local shell that runs
//! the bridge program, and the device shell the bridge forwards text to. Each
//! context gets its own quoting rule, and the composed form applies them
//! remote-first so quotes introduced by the remote step are neutralized for
//! the local shell. Escaping never fails; every input, including the empty
//! string, yields a valid token.

/// Quote `raw` for a POSIX local shell using single quotes.
///
/// Embedded single quotes become `'\''` (close, escaped literal, reopen).
pub fn escape_for_local_shell(raw: &str) -> String {
    if raw.is_empty() {
        "''".into()
    } else {
        format!("'{}'", raw.replace('\'', "'\\''"))
    }
}

/// Quote `raw` for the device shell using double quotes.
///
/// Backslash, double quote, backtick, and dollar are backslash-escaped so the
/// device shell performs no expansion inside the token.
pub fn escape_for_remote_shell(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('"');
    for ch in raw.chars() {
        if matches!(ch, '\\' | '"' | '`' | '$') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

/// Quote `raw` for the device shell, then quote that whole token again for the
/// local shell that launches the bridge program.
pub fn escape_for_remote_via_local(raw: &str) -> String {
    escape_for_local_shell(&escape_for_remote_shell(raw))
}
