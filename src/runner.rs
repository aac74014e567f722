//! Command runner collaborator.
//!
//! Runs the control tool via `/usr/bin/bash -lc "<tool> <argv…>"` to mimic an
//! interactive login shell (the tool expects the user's profile, SSH config
//! and keys), optionally forcing `HOME` to the account that owns them.
//! Timeout enforcement lives here; the engine only ever sees a terminal
//! outcome.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

use crate::engine::ToolOutput;
use crate::error::RunnerError;

#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub tool_bin: String,
    pub home: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct ToolRunner {
    config: RunnerConfig,
}

impl ToolRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// The quoted command string handed to `bash -lc`.
    pub fn shell_command(&self, argv: &[String]) -> String {
        let mut parts: Vec<&str> = vec![self.config.tool_bin.as_str()];
        parts.extend(argv.iter().map(String::as_str));
        shlex::try_join(parts.iter().copied()).unwrap_or_else(|_| parts.join(" "))
    }

    pub async fn run(&self, argv: &[String]) -> Result<ToolOutput, RunnerError> {
        let command_line = self.shell_command(argv);
        tracing::info!(command = %command_line, "executing control tool");

        let mut command = Command::new("/usr/bin/bash");
        command
            .arg("-lc")
            .arg(&command_line)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(home) = &self.config.home {
            command.env("HOME", home);
        }

        let timeout = Duration::from_secs(self.config.timeout_secs);
        let output = match tokio::time::timeout(timeout, command.output()).await {
            Err(_) => {
                tracing::warn!(timeout_secs = self.config.timeout_secs, "control tool timed out");
                return Err(RunnerError::Timeout {
                    tool: self.config.tool_bin.clone(),
                    seconds: self.config.timeout_secs,
                });
            }
            Ok(Err(error)) => {
                return Err(RunnerError::Unavailable {
                    tool: self.config.tool_bin.clone(),
                    reason: error.to_string(),
                })
            }
            Ok(Ok(output)) => output,
        };

        Ok(ToolOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
