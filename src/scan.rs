//! Line-level matchers shared by the report parsers.
//!
//! One named matcher per label/marker keeps every parser a single linear pass
//! and lets each matcher be tested on its own, instead of a pile of ad-hoc
//! regexes scattered through the parsing code.

use std::sync::LazyLock;

use regex::Regex;

static PORT_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":(\d{2,5})\b").expect("valid regex"));

/// Match `<label> : <value>` ignoring leading whitespace. Label comparison is
/// exact; whitespace around the colon is tolerated. Returns the trimmed value.
pub fn label_value<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let rest = line.trim_start().strip_prefix(label)?;
    let rest = rest.trim_start();
    let rest = rest.strip_prefix(':')?;
    Some(rest.trim())
}

/// Case-insensitive variant of [`label_value`], for the indented sub-fields
/// of multi-host reports where the tool is inconsistent about casing.
pub fn label_value_ci<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let trimmed = line.trim_start();
    let head = trimmed.get(..label.len())?;
    if !head.eq_ignore_ascii_case(label) {
        return None;
    }
    let rest = trimmed[label.len()..].trim_start();
    let rest = rest.strip_prefix(':')?;
    Some(rest.trim())
}

/// Last `:<2-5 digit>` port token on the line, if any.
pub fn last_port_token(line: &str) -> Option<String> {
    PORT_TOKEN
        .captures_iter(line)
        .last()
        .map(|caps| caps[1].to_string())
}

/// A line consisting only of `=` characters (three or more), used by the
/// control tool as a host-chunk delimiter.
pub fn is_rule_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 3 && trimmed.chars().all(|c| c == '=')
}
