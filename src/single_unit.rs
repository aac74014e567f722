//! Parser for the single-service status block.
//!
//! The plain `status <client> <host> <app>` report is one systemd-style block:
//! header fields, an `Active:` line (with optional since/uptime clause), a
//! `Memory:` line, and socket lines carrying a LISTEN marker. Parsing is
//! total: anything malformed degrades to `Unknown`/unset fields.

use crate::header::{extract_headers, HeaderFields};
use crate::scan::{label_value, last_port_token};
use crate::state::ServiceState;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SingleUnitReport {
    pub headers: HeaderFields,
    pub state: ServiceState,
    pub since: Option<String>,
    pub uptime: Option<String>,
    pub memory: Option<String>,
    pub port: Option<String>,
}

pub fn parse_single_unit(text: &str) -> SingleUnitReport {
    let mut report = SingleUnitReport {
        headers: extract_headers(text),
        ..Default::default()
    };

    if let Some(active) = text
        .lines()
        .map(str::trim)
        .find(|line| line.starts_with("Active:"))
    {
        report.state = active_line_state(active);
        if let Some(tail) = active.split_once(" since ").map(|(_, tail)| tail.trim()) {
            match tail.split_once(';') {
                Some((since, uptime)) => {
                    report.since = non_empty(since);
                    report.uptime = non_empty(uptime);
                }
                None => report.since = non_empty(tail),
            }
        }
    }

    report.memory = text
        .lines()
        .find_map(|line| label_value(line, "Memory"))
        .and_then(non_empty);

    // Later LISTEN lines override earlier ones; last port on the line wins.
    for line in text.lines() {
        if line.contains("LISTEN") && line.contains(':') {
            if let Some(port) = last_port_token(line) {
                report.port = Some(port);
            }
        }
    }

    report
}

fn active_line_state(line: &str) -> ServiceState {
    let low = line.to_ascii_lowercase();
    if low.contains("running") {
        ServiceState::Running
    } else if low.contains("inactive") || low.contains("dead") {
        ServiceState::Stopped
    } else if low.contains("failed") {
        ServiceState::Failed
    } else {
        ServiceState::Unknown
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
