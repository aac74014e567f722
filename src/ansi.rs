//! Terminal output normalization.
//!
//! The control tool runs under a login shell and colors its reports; the chat
//! platform renders none of that. Everything that reaches a parser or a
//! message body goes through here first.

/// Hard ceiling for any raw text segment in an outgoing message.
/// The platform rejects payloads above ~4k characters per text object.
pub const MAX_TEXT_CHARS: usize = 3900;

const NO_OUTPUT: &str = "(no output)";

/// Strip CSI escape sequences (ESC `[`, parameter bytes `0`-`?`, intermediate
/// bytes ` `-`/`, final byte `@`-`~`). Idempotent: clean text passes through
/// unchanged.
pub fn strip_ansi(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            while matches!(chars.peek(), Some(&p) if ('0'..='?').contains(&p)) {
                chars.next();
            }
            while matches!(chars.peek(), Some(&p) if (' '..='/').contains(&p)) {
                chars.next();
            }
            if matches!(chars.peek(), Some(&f) if ('@'..='~').contains(&f)) {
                chars.next();
            }
        } else {
            result.push(c);
        }
    }
    result
}

/// Normalize raw tool output for display: strip escapes, trim, then cap at
/// [`MAX_TEXT_CHARS`]. Empty results become a literal `(no output)` marker so
/// the fallback text is never blank.
pub fn clamp_output(text: &str) -> String {
    let clean = strip_ansi(text);
    let trimmed = clean.trim();
    if trimmed.is_empty() {
        return NO_OUTPUT.to_string();
    }
    trimmed.chars().take(MAX_TEXT_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_color_sequences() {
        let input = "\x1b[32mActive: active (running)\x1b[0m";
        assert_eq!(strip_ansi(input), "Active: active (running)");
    }

    #[test]
    fn strips_cursor_and_erase_sequences() {
        let input = "\x1b[2J\x1b[1;1Hstatus\x1b[K";
        assert_eq!(strip_ansi(input), "status");
    }

    #[test]
    fn clean_text_is_untouched() {
        let input = "Client: ACME\nHost: web-01\n";
        assert_eq!(strip_ansi(input), input);
    }

    #[test]
    fn idempotent() {
        let input = "\x1b[31mFAILED\x1b[0m plus plain text";
        let once = strip_ansi(input);
        assert_eq!(strip_ansi(&once), once);
    }

    #[test]
    fn lone_escape_is_preserved() {
        let input = "before \x1b after";
        assert_eq!(strip_ansi(input), input);
    }

    #[test]
    fn clamp_empty_yields_marker() {
        assert_eq!(clamp_output(""), "(no output)");
        assert_eq!(clamp_output("   \n  "), "(no output)");
        assert_eq!(clamp_output("\x1b[0m"), "(no output)");
    }

    #[test]
    fn clamp_truncates_long_output() {
        let long = "x".repeat(MAX_TEXT_CHARS + 500);
        assert_eq!(clamp_output(&long).chars().count(), MAX_TEXT_CHARS);
    }

    #[test]
    fn clamp_trims_before_truncating() {
        let padded = format!("  {}  ", "y".repeat(10));
        assert_eq!(clamp_output(&padded), "y".repeat(10));
    }
}
