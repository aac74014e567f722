//! Typed failures surfaced to the user as chat text. Nothing here aborts the
//! bridge; every variant renders into a payload.

use thiserror::Error;

/// Rejections raised while classifying the slash-command line, before the
/// control tool is ever invoked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Subcommand not allowed: `{0}`")]
    UnsupportedCommand(String),

    #[error("ERROR: `{subcommand}` requires `{expected}`.")]
    MissingArguments {
        subcommand: String,
        expected: String,
    },
}

/// Terminal outcomes reported by the command runner when the control tool
/// produced no usable output. Surfaced as opaque text, never re-parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunnerError {
    #[error("⏱️ {tool} timed out ({seconds}s).")]
    Timeout { tool: String, seconds: u64 },

    #[error("🔴 Failed to run {tool}: {reason}")]
    Unavailable { tool: String, reason: String },
}
