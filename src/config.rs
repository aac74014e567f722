use clap::Parser;

use crate::engine::EngineConfig;
use crate::runner::RunnerConfig;

#[derive(Debug, Parser, Clone)]
#[command(name = "appctl-bridge")]
#[command(about = "Interprets control-tool slash commands and renders chat reports")]
pub struct Config {
    /// Control tool binary, name or absolute path.
    #[arg(long, default_value = "appctl")]
    pub tool_bin: String,

    /// HOME override for the login shell, so the tool finds the owning
    /// account's SSH config and keys.
    #[arg(long)]
    pub tool_home: Option<String>,

    /// Control tool timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Brand name shown in usage text.
    #[arg(long, default_value = "AppPilot")]
    pub brand: String,

    /// Slash command name shown in usage text.
    #[arg(long, default_value = "/appctl")]
    pub slash_command: String,

    /// Response webhook URL; without it the message JSON goes to stdout.
    #[arg(long)]
    pub webhook_url: Option<String>,

    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Emit machine-readable invocation events on stderr.
    #[arg(long, default_value_t = false)]
    pub json_events: bool,

    /// The slash-command text, exactly as the platform delivers it.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub text: Vec<String>,
}

impl Config {
    pub fn command_text(&self) -> String {
        self.text.join(" ")
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            brand: self.brand.clone(),
            slash_command: self.slash_command.clone(),
        }
    }

    pub fn runner_config(&self) -> RunnerConfig {
        RunnerConfig {
            tool_bin: self.tool_bin.clone(),
            home: self.tool_home.clone(),
            timeout_secs: self.timeout,
        }
    }
}
