//! Parser for componentized application reports.
//!
//! One logical app made of several named sub-units, optionally replicated
//! across hosts. Multi-host output separates each host's chunk with a block of
//! the form
//!
//! ```text
//! ==========================
//! Running on host: web-02
//! ==========================
//! ```
//!
//! Each chunk yields at most one section: a synthetic MAIN row from the
//! `Main-State:` line plus one row per `Component:` block. Chunks producing no
//! rows yield no section.

use crate::header::extract_headers;
use crate::scan::{is_rule_line, label_value};

pub const COMPONENT_MARKER: &str = "Component:";
pub const MAIN_STATE_MARKER: &str = "Main-State:";

pub const MAIN_ROW_NAME: &str = "MAIN";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentRow {
    pub name: String,
    pub unit: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentSection {
    pub client: Option<String>,
    pub host: Option<String>,
    pub env: Option<String>,
    pub app: Option<String>,
    pub rows: Vec<ComponentRow>,
}

pub fn has_component_marker(text: &str) -> bool {
    text.lines().any(|line| {
        let trimmed = line.trim_start();
        trimmed.starts_with(COMPONENT_MARKER) || trimmed.starts_with(MAIN_STATE_MARKER)
    })
}

pub fn parse_component_report(text: &str) -> Vec<ComponentSection> {
    split_host_chunks(text)
        .into_iter()
        .filter_map(|chunk| parse_chunk(&chunk))
        .collect()
}

struct HostChunk {
    host: Option<String>,
    body: String,
}

/// Split on `=== / Running on host: <name> / ===` delimiter blocks. Absent the
/// delimiter the whole text is one chunk with no host override.
fn split_host_chunks(text: &str) -> Vec<HostChunk> {
    let lines: Vec<&str> = text.lines().collect();
    let mut chunks: Vec<HostChunk> = Vec::new();
    let mut current = HostChunk {
        host: None,
        body: String::new(),
    };
    let mut started = false;

    let mut i = 0;
    while i < lines.len() {
        let delimiter_host = (i + 2 < lines.len()
            && is_rule_line(lines[i])
            && is_rule_line(lines[i + 2]))
        .then(|| label_value(lines[i + 1], "Running on host"))
        .flatten();

        if let Some(host) = delimiter_host {
            if started {
                chunks.push(current);
            }
            current = HostChunk {
                host: Some(host.to_string()),
                body: String::new(),
            };
            started = true;
            i += 3;
            continue;
        }

        current.body.push_str(lines[i]);
        current.body.push('\n');
        started = true;
        i += 1;
    }

    if started {
        chunks.push(current);
    }
    chunks
}

fn parse_chunk(chunk: &HostChunk) -> Option<ComponentSection> {
    let headers = extract_headers(&chunk.body);
    let mut section = ComponentSection {
        client: headers.client,
        host: headers.host.or_else(|| chunk.host.clone()),
        env: headers.env,
        app: headers.app,
        rows: Vec::new(),
    };

    let main_state = chunk
        .body
        .lines()
        .find_map(|line| label_value(line, "Main-State"))
        .map(str::to_string);
    if main_state.is_some() || headers.service.is_some() {
        section.rows.push(ComponentRow {
            name: MAIN_ROW_NAME.to_string(),
            unit: headers.service,
            state: main_state,
        });
    }

    let mut open: Option<ComponentRow> = None;
    for line in chunk.body.lines() {
        if let Some(name) = label_value(line, "Component") {
            if let Some(row) = open.take() {
                section.rows.push(row);
            }
            open = Some(ComponentRow {
                name: name.to_string(),
                ..Default::default()
            });
        } else if let Some(row) = open.as_mut() {
            if let Some(state) = label_value(line, "State") {
                row.state = Some(state.to_string());
            } else if let Some(unit) = label_value(line, "Unit") {
                row.unit = Some(unit.to_string());
            }
        }
    }
    if let Some(row) = open.take() {
        section.rows.push(row);
    }

    (!section.rows.is_empty()).then_some(section)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SINGLE_HOST: &str = "\
Client: ACME Corp
Host: web-01
Env: PROD
App: BEP
Service: bep-main.service
Main-State: active
Component: scheduler
State: active
Unit: bep-scheduler.service
Component: worker
State: failed
Unit: bep-worker.service
";

    #[test]
    fn marker_detection() {
        assert!(has_component_marker("Component: x\n"));
        assert!(has_component_marker("Main-State: active\n"));
        assert!(!has_component_marker("State: active\n"));
    }

    #[test]
    fn main_row_then_components_in_order() {
        let sections = parse_component_report(SINGLE_HOST);
        assert_eq!(sections.len(), 1);
        let rows = &sections[0].rows;
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].name, "MAIN");
        assert_eq!(rows[0].unit.as_deref(), Some("bep-main.service"));
        assert_eq!(rows[0].state.as_deref(), Some("active"));
        assert_eq!(rows[1].name, "scheduler");
        assert_eq!(rows[1].state.as_deref(), Some("active"));
        assert_eq!(rows[2].name, "worker");
        assert_eq!(rows[2].unit.as_deref(), Some("bep-worker.service"));
    }

    #[test]
    fn main_row_from_service_alone() {
        let text = "Service: only.service\nComponent: a\nState: active\n";
        let rows = &parse_component_report(text)[0].rows;
        assert_eq!(rows[0].name, "MAIN");
        assert_eq!(rows[0].unit.as_deref(), Some("only.service"));
        assert_eq!(rows[0].state, None);
    }

    #[test]
    fn host_delimiter_splits_chunks() {
        let text = format!(
            "==========\nRunning on host: web-01\n==========\n{}\n==========\nRunning on host: web-02\n==========\nMain-State: failed\n",
            "App: BEP\nMain-State: active\n"
        );
        let sections = parse_component_report(&text);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].host.as_deref(), Some("web-01"));
        assert_eq!(sections[0].rows[0].state.as_deref(), Some("active"));
        assert_eq!(sections[1].host.as_deref(), Some("web-02"));
        assert_eq!(sections[1].rows[0].state.as_deref(), Some("failed"));
    }

    #[test]
    fn header_host_wins_over_delimiter_host() {
        let text = "==========\nRunning on host: alias-01\n==========\nHost: real-01\nMain-State: active\n";
        let sections = parse_component_report(text);
        assert_eq!(sections[0].host.as_deref(), Some("real-01"));
    }

    #[test]
    fn chunk_without_rows_yields_no_section() {
        let text = "==========\nRunning on host: idle-01\n==========\nnothing here\n";
        assert!(parse_component_report(text).is_empty());
    }

    #[test]
    fn state_line_outside_component_is_ignored() {
        let text = "State: stray\nComponent: a\nState: active\n";
        let sections = parse_component_report(text);
        assert_eq!(sections.len(), 1);
        let rows = &sections[0].rows;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "a");
        assert_eq!(rows[0].state.as_deref(), Some("active"));
    }
}
