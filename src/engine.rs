//! The interpretation-and-rendering engine.
//!
//! A pure transformation from (command line, collected tool output, exit
//! status) to a [`RenderPayload`]. No I/O happens here: the command runner
//! collects the output, the delivery channel ships the payload. Every input,
//! including empty input and garbage output, yields a payload with non-empty
//! fallback text.

use crate::ansi::strip_ansi;
use crate::command::{parse_command, CommandPlan};
use crate::error::{CommandError, RunnerError};
use crate::layout::{select_shape, ReportShape};
use crate::render::{
    render_component, render_multi, render_raw, render_single, render_url, RenderPayload,
};
use crate::single_unit::{parse_single_unit, SingleUnitReport};

/// Immutable per-process engine settings, built once at startup. The engine
/// never reads the environment itself.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub brand: String,
    pub slash_command: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            brand: "AppPilot".to_string(),
            slash_command: "/appctl".to_string(),
        }
    }
}

/// Terminal outcome of one control-tool invocation, as collected by the
/// command runner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    /// stdout with stderr appended on a new line, when stderr is non-empty.
    pub fn combined(&self) -> String {
        if self.stderr.is_empty() {
            self.stdout.trim().to_string()
        } else {
            format!("{}\n{}", self.stdout, self.stderr).trim().to_string()
        }
    }
}

#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Classify and validate one slash-command line. `Ok(None)` means empty
    /// input; answer with [`Engine::usage`].
    pub fn plan(&self, text: &str) -> Result<Option<CommandPlan>, CommandError> {
        parse_command(text)
    }

    pub fn usage(&self) -> RenderPayload {
        let slash = &self.config.slash_command;
        RenderPayload::text_only(format!(
            "{} usage:\n\
             • `{slash} status <CLIENT> <HOST|ENV> [APP] [--exec|--exec-tty]`\n\
             • `{slash} journal <CLIENT> <HOST|ENV> <APP> --lines 20 --exec`\n\
             • Add `--raw` to force raw output",
            self.config.brand,
        ))
    }

    pub fn rejection(&self, error: &CommandError) -> RenderPayload {
        let text = match error {
            CommandError::UnsupportedCommand(_) => error.to_string(),
            CommandError::MissingArguments { subcommand, .. } => format!(
                "{error}\nExample:\n`{} {subcommand} ACME web-01 BEP --exec`",
                self.config.slash_command,
            ),
        };
        RenderPayload::text_only(text)
    }

    pub fn failure(&self, error: &RunnerError) -> RenderPayload {
        RenderPayload::text_only(error.to_string())
    }

    /// Turn one collected tool outcome into a rendering payload.
    pub fn respond(&self, plan: &CommandPlan, output: &ToolOutput) -> RenderPayload {
        let clean = strip_ansi(&output.combined());
        let summary = self.status_summary(plan, &clean);

        // A failing tool always reports raw, whatever the layout policy says.
        if output.exit_code != 0 {
            let raw = render_raw(&clean, summary.as_ref());
            return RenderPayload::text_only(format!("Exit {}\n{}", output.exit_code, raw.text));
        }

        match select_shape(plan, &clean) {
            ReportShape::Raw => render_raw(&clean, summary.as_ref()),
            ReportShape::Url(report) => render_url(&report, &clean),
            ReportShape::Component(sections) => render_component(&sections),
            ReportShape::MultiApp(sections) => render_multi(&sections),
            ReportShape::Single(report) => render_single(&report),
        }
    }

    /// Header summary used to annotate raw status output.
    fn status_summary(&self, plan: &CommandPlan, clean: &str) -> Option<SingleUnitReport> {
        (plan.subcommand() == "status").then(|| parse_single_unit(clean))
    }
}
