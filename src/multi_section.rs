//! Parser for the "status across all apps/hosts" report shape.
//!
//! The tool emits one Client/Host/Env header group per host, each followed by
//! `APP: <name>` blocks whose details sit on lines indented by exactly two
//! spaces. A header label at the top level starts a new section once the open
//! one has begun accumulating apps; a section opened but left empty is still
//! emitted.

use crate::scan::{label_value, label_value_ci};
use crate::state::{unit_badge, Badge};

pub const MULTI_APP_MARKER: &str = "APP:";

const APP_FIELD_LABELS: [&str; 5] = ["Service", "Port", "RunAs", "State", "Listen"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppRow {
    pub app: String,
    pub service: Option<String>,
    pub port: Option<String>,
    pub run_as: Option<String>,
    pub state: Option<String>,
    pub listen: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostSection {
    pub client: Option<String>,
    pub host: Option<String>,
    pub env: Option<String>,
    pub apps: Vec<AppRow>,
}

/// True when the report carries the all-apps marker on some line start.
pub fn has_multi_app_marker(text: &str) -> bool {
    text.lines()
        .any(|line| line.trim_start().starts_with(MULTI_APP_MARKER))
}

pub fn parse_multi_section(text: &str) -> Vec<HostSection> {
    let mut sections: Vec<HostSection> = Vec::new();
    let mut current: Option<HostSection> = None;
    let mut app: Option<AppRow> = None;

    for line in text.lines() {
        if let Some(name) = label_value(line, "APP") {
            if let Some(open) = app.take() {
                current.get_or_insert_with(HostSection::default).apps.push(open);
            }
            app = Some(AppRow {
                app: name.to_string(),
                ..Default::default()
            });
            continue;
        }

        if is_app_detail_line(line) {
            if let Some(row) = app.as_mut() {
                for label in APP_FIELD_LABELS {
                    if let Some(value) = label_value_ci(line, label) {
                        set_app_field(row, label, value);
                        break;
                    }
                }
            }
            continue;
        }

        for (label, pick) in [
            ("Client", 0usize),
            ("Host", 1),
            ("Env", 2),
        ] {
            if let Some(value) = label_value(line, label) {
                let reopen = match &current {
                    Some(section) => !section.apps.is_empty() || app.is_some(),
                    None => true,
                };
                if reopen {
                    if let Some(open) = app.take() {
                        current.get_or_insert_with(HostSection::default).apps.push(open);
                    }
                    if let Some(done) = current.take() {
                        sections.push(done);
                    }
                    current = Some(HostSection::default());
                }
                let section = current.as_mut().expect("section opened above");
                let slot = match pick {
                    0 => &mut section.client,
                    1 => &mut section.host,
                    _ => &mut section.env,
                };
                if slot.is_none() {
                    *slot = Some(value.to_string());
                }
                break;
            }
        }
    }

    if let Some(open) = app.take() {
        current.get_or_insert_with(HostSection::default).apps.push(open);
    }
    if let Some(done) = current.take() {
        sections.push(done);
    }
    sections
}

/// Health icon for one app row, judged from state and listen socket together:
/// an active service that is not listening is only half-healthy.
pub fn app_badge(row: &AppRow) -> Badge {
    let state = row.state.as_deref().unwrap_or("");
    match unit_badge(state) {
        Badge::Green => {
            if is_listening(row.listen.as_deref().unwrap_or("")) {
                Badge::Green
            } else {
                Badge::Yellow
            }
        }
        other => other,
    }
}

fn is_listening(listen: &str) -> bool {
    let low = listen.trim().to_ascii_lowercase();
    !(low.is_empty() || low == "no" || low == "none" || low == "-" || low == "n/a")
}

fn is_app_detail_line(line: &str) -> bool {
    match line.strip_prefix("  ") {
        Some(rest) => !rest.starts_with(' ') && rest.contains(':'),
        None => false,
    }
}

fn set_app_field(row: &mut AppRow, label: &str, value: &str) {
    let value = (!value.is_empty()).then(|| value.to_string());
    match label {
        "Service" => row.service = value,
        "Port" => row.port = value,
        "RunAs" => row.run_as = value,
        "State" => row.state = value,
        "Listen" => row.listen = value,
        _ => unreachable!("label set is fixed"),
    }
}
