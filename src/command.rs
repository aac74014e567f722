//! Slash-command classification.
//!
//! The user-supplied line is tokenized with shell quoting rules and split
//! three ways: `core` (the subcommand, positional args, and command-specific
//! flags such as `--lines 5`, in input order because the control tool is
//! order-sensitive), `tool_flags` (the fixed pass-through allow-list), and
//! `local_flags` (flags the bridge consumes itself). Flags outside both
//! allow-lists stay in `core` — there is no wildcard pass-through.

use crate::error::CommandError;

pub const ALLOWED_SUBCOMMANDS: [&str; 8] = [
    "info", "status", "logs", "journal", "url", "restart", "stop", "start",
];

/// Flags forwarded to the control tool, order-insensitive.
pub const TOOL_FLAGS: [&str; 3] = ["--exec", "--exec-tty", "--all"];

/// Flags consumed by the bridge itself.
pub const LOCAL_FLAGS: [&str; 1] = [FORCE_RAW_FLAG];

pub const FORCE_RAW_FLAG: &str = "--raw";

const EXEC_FLAGS: [&str; 2] = ["--exec", "--exec-tty"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandPlan {
    pub core: Vec<String>,
    pub tool_flags: Vec<String>,
    pub local_flags: Vec<String>,
}

impl CommandPlan {
    pub fn subcommand(&self) -> &str {
        self.core.first().map(String::as_str).unwrap_or("")
    }

    /// The report was produced by live execution (not a cached/static path).
    pub fn exec_mode(&self) -> bool {
        self.tool_flags
            .iter()
            .any(|flag| EXEC_FLAGS.contains(&flag.as_str()))
    }

    pub fn force_raw(&self) -> bool {
        self.local_flags.iter().any(|flag| flag == FORCE_RAW_FLAG)
    }

    /// Argv forwarded to the control tool: core in input order, then the
    /// pass-through flags.
    pub fn tool_argv(&self) -> Vec<String> {
        let mut argv = self.core.clone();
        argv.extend(self.tool_flags.iter().cloned());
        argv
    }

    fn positional_count(&self) -> usize {
        self.core
            .iter()
            .skip(1)
            .filter(|token| !token.starts_with("--"))
            .count()
    }
}

/// Tokenize with POSIX-like shell quoting; a line shlex cannot parse (e.g. an
/// unterminated quote) degrades to whitespace splitting rather than failing.
pub fn tokenize(text: &str) -> Vec<String> {
    shlex::split(text)
        .unwrap_or_else(|| text.split_whitespace().map(str::to_string).collect())
}

/// Place every token in exactly one of the three sets, preserving `core`
/// order.
pub fn classify_tokens(tokens: Vec<String>) -> CommandPlan {
    let mut plan = CommandPlan::default();
    for token in tokens {
        if LOCAL_FLAGS.contains(&token.as_str()) {
            plan.local_flags.push(token);
        } else if TOOL_FLAGS.contains(&token.as_str()) {
            plan.tool_flags.push(token);
        } else {
            plan.core.push(token);
        }
    }
    plan
}

/// Classify and validate one slash-command line. `Ok(None)` means the line
/// was empty and the caller should answer with usage text.
pub fn parse_command(text: &str) -> Result<Option<CommandPlan>, CommandError> {
    let tokens = tokenize(text);
    if tokens.is_empty() {
        return Ok(None);
    }

    let plan = classify_tokens(tokens);
    let subcommand = plan.subcommand().to_string();
    if !ALLOWED_SUBCOMMANDS.contains(&subcommand.as_str()) {
        return Err(CommandError::UnsupportedCommand(subcommand));
    }

    let (min_positional, expected) = required_shape(&subcommand);
    if plan.positional_count() < min_positional {
        return Err(CommandError::MissingArguments {
            subcommand,
            expected: expected.to_string(),
        });
    }

    Ok(Some(plan))
}

fn required_shape(subcommand: &str) -> (usize, &'static str) {
    match subcommand {
        "status" | "info" => (2, "<CLIENT> <HOST|ENV>"),
        _ => (3, "<CLIENT> <HOST|ENV> <APP>"),
    }
}
