//! Block-based report layouts and the raw fallback.
//!
//! Every rendering produces a [`RenderPayload`]: plain fallback text that any
//! delivery channel can show, plus an optional block sequence for channels
//! with rich layout support. Fallback text is never empty.

use serde::{Deserialize, Serialize};

use crate::ansi::clamp_output;
use crate::component::ComponentSection;
use crate::multi_section::{app_badge, HostSection};
use crate::single_unit::SingleUnitReport;
use crate::state::unit_badge;
use crate::url_probe::{http_badge, UrlProbeReport};

/// Cap on table rows per rendering; anything beyond is dropped.
pub const MAX_TABLE_ROWS: usize = 120;

/// Cap on characters per table cell before the ellipsis marker.
pub const MAX_CELL_CHARS: usize = 24;

const PLACEHOLDER: &str = "—";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "body", rename_all = "snake_case")]
pub enum LayoutBlock {
    Header(String),
    Markup(String),
    Fields(Vec<(String, String)>),
    Divider,
    Table(Vec<Vec<String>>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderPayload {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<LayoutBlock>>,
}

impl RenderPayload {
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            blocks: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Structured layouts
// ---------------------------------------------------------------------------

pub fn render_single(report: &SingleUnitReport) -> RenderPayload {
    let h = &report.headers;
    let app = or_unknown(h.app.as_deref());
    let host = or_unknown(h.host.as_deref());
    let state = report.state;
    let icon = state.badge().icon();

    let summary = format!(
        "{icon} *{app}* on *{host}*\n*Client:* {}\n*Environment:* {}",
        or_unknown(h.client.as_deref()),
        or_unknown(h.env.as_deref()),
    );

    let fields = vec![
        ("Service".to_string(), format!("`{}`", or_unknown(h.service.as_deref()))),
        ("State".to_string(), format!("{icon} *{state}*")),
        ("Uptime".to_string(), or_placeholder(report.uptime.as_deref())),
        ("Since".to_string(), or_placeholder(report.since.as_deref())),
        ("Memory".to_string(), or_placeholder(report.memory.as_deref())),
        ("Port".to_string(), or_placeholder(report.port.as_deref())),
    ];

    RenderPayload {
        text: format!("Status {app} on {host}: {state}"),
        blocks: Some(vec![
            LayoutBlock::Header("Status Result".to_string()),
            LayoutBlock::Markup(summary),
            LayoutBlock::Divider,
            LayoutBlock::Fields(fields),
        ]),
    }
}

pub fn render_multi(sections: &[HostSection]) -> RenderPayload {
    let mut blocks = vec![LayoutBlock::Header("Status Across Hosts".to_string())];
    let mut budget = MAX_TABLE_ROWS;
    let mut app_total = 0usize;

    for (idx, section) in sections.iter().enumerate() {
        if idx > 0 {
            blocks.push(LayoutBlock::Divider);
        }
        blocks.push(LayoutBlock::Markup(format!(
            "*{}* (env: {}) — *{}*",
            or_unknown(section.host.as_deref()),
            or_unknown(section.env.as_deref()),
            or_unknown(section.client.as_deref()),
        )));

        app_total += section.apps.len();
        let mut rows = vec![row(["", "APP", "SERVICE", "PORT", "RUNAS", "STATE"])];
        for app in &section.apps {
            rows.push(row([
                app_badge(app).icon(),
                app.app.as_str(),
                app.service.as_deref().unwrap_or(PLACEHOLDER),
                app.port.as_deref().unwrap_or(PLACEHOLDER),
                app.run_as.as_deref().unwrap_or(PLACEHOLDER),
                app.state.as_deref().unwrap_or(PLACEHOLDER),
            ]));
        }
        blocks.push(LayoutBlock::Table(take_rows(rows, &mut budget)));
    }

    RenderPayload {
        text: format!("Status: {app_total} apps across {} hosts", sections.len()),
        blocks: Some(blocks),
    }
}

pub fn render_component(sections: &[ComponentSection]) -> RenderPayload {
    let mut blocks = vec![LayoutBlock::Header("Component Status".to_string())];
    let mut budget = MAX_TABLE_ROWS;

    for (idx, section) in sections.iter().enumerate() {
        if idx > 0 {
            blocks.push(LayoutBlock::Divider);
        }
        blocks.push(LayoutBlock::Markup(format!(
            "*{}* on *{}* (env: {})\n*Client:* {}",
            or_unknown(section.app.as_deref()),
            or_unknown(section.host.as_deref()),
            or_unknown(section.env.as_deref()),
            or_unknown(section.client.as_deref()),
        )));

        let mut rows = vec![row(["", "COMPONENT", "UNIT", "STATE"])];
        for component in &section.rows {
            let state = component.state.as_deref().unwrap_or("");
            rows.push(row([
                unit_badge(state).icon(),
                component.name.as_str(),
                component.unit.as_deref().unwrap_or(PLACEHOLDER),
                if state.is_empty() { PLACEHOLDER } else { state },
            ]));
        }
        blocks.push(LayoutBlock::Table(take_rows(rows, &mut budget)));
    }

    let app = sections
        .first()
        .and_then(|section| section.app.as_deref())
        .unwrap_or("app");
    RenderPayload {
        text: format!("Component status for {app}: {} section(s)", sections.len()),
        blocks: Some(blocks),
    }
}

pub fn render_url(report: &UrlProbeReport, clean: &str) -> RenderPayload {
    let icon = http_badge(report, clean).icon();
    let code = or_placeholder(report.http_code.as_deref());
    let time = report
        .elapsed_secs
        .as_deref()
        .map(|secs| format!("{secs}s"))
        .unwrap_or_else(|| PLACEHOLDER.to_string());

    RenderPayload {
        text: format!(
            "URL check {}: HTTP {code}",
            or_unknown(report.url.as_deref())
        ),
        blocks: Some(vec![
            LayoutBlock::Header("URL Check".to_string()),
            LayoutBlock::Fields(vec![
                ("URL".to_string(), or_placeholder(report.url.as_deref())),
                ("HTTP".to_string(), format!("{icon} {code}")),
                ("Time".to_string(), time),
            ]),
        ]),
    }
}

// ---------------------------------------------------------------------------
// Raw fallback
// ---------------------------------------------------------------------------

/// Fence the normalized text, prefixed with a one-line badge summary when
/// header fields were recovered from the output.
pub fn render_raw(clean: &str, summary: Option<&SingleUnitReport>) -> RenderPayload {
    let fenced = format!("```{}```", clamp_output(clean));

    let summary = summary.filter(|report| !report.headers.is_empty());
    let Some(report) = summary else {
        return RenderPayload::text_only(fenced);
    };

    let h = &report.headers;
    let state = report.state;
    let icon = state.badge().icon();
    let header = format!(
        "{icon} *{}*  |  *{}* ({})  |  *{}*\n*Service:* `{}`  •  *RunAs:* `{}`  •  *Status:* *{state}*",
        or_unknown(h.client.as_deref()),
        or_unknown(h.host.as_deref()),
        or_unknown(h.env.as_deref()),
        or_unknown(h.app.as_deref()),
        or_unknown(h.service.as_deref()),
        or_unknown(h.run_as.as_deref()),
    );

    RenderPayload::text_only(format!("{header}\n{fenced}"))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn row<const N: usize>(cells: [&str; N]) -> Vec<String> {
    cells.iter().map(|cell| truncate_cell(cell)).collect()
}

fn truncate_cell(cell: &str) -> String {
    if cell.chars().count() <= MAX_CELL_CHARS {
        return cell.to_string();
    }
    let mut truncated: String = cell.chars().take(MAX_CELL_CHARS).collect();
    truncated.push('…');
    truncated
}

fn take_rows(rows: Vec<Vec<String>>, budget: &mut usize) -> Vec<Vec<String>> {
    let taken: Vec<Vec<String>> = rows.into_iter().take(*budget).collect();
    *budget -= taken.len();
    taken
}

fn or_unknown(value: Option<&str>) -> &str {
    value.unwrap_or("Unknown")
}

fn or_placeholder(value: Option<&str>) -> String {
    value.unwrap_or(PLACEHOLDER).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::parse_component_report;
    use crate::header::HeaderFields;
    use crate::multi_section::parse_multi_section;
    use crate::single_unit::parse_single_unit;
    use crate::state::ServiceState;
    use crate::url_probe::parse_url_probe;

    #[test]
    fn single_layout_shape() {
        let report = parse_single_unit(
            "App: BEP\nHost: web-01\nActive: active (running) since Mon; 1h ago\n",
        );
        let payload = render_single(&report);
        assert_eq!(payload.text, "Status BEP on web-01: RUNNING");
        let blocks = payload.blocks.expect("structured");
        assert!(matches!(&blocks[0], LayoutBlock::Header(t) if t == "Status Result"));
        assert!(matches!(&blocks[1], LayoutBlock::Markup(t) if t.contains("🟢 *BEP* on *web-01*")));
        assert_eq!(blocks[2], LayoutBlock::Divider);
        let LayoutBlock::Fields(fields) = &blocks[3] else {
            panic!("expected field block");
        };
        assert_eq!(fields.len(), 6);
        assert_eq!(fields[1].1, "🟢 *RUNNING*");
        assert_eq!(fields[4].1, "—");
    }

    #[test]
    fn multi_layout_one_table_per_section() {
        let sections = parse_multi_section(
            "Host: h1\nAPP: A\n  State: active\n  Listen: yes\nHost: h2\nAPP: B\n  State: failed\n",
        );
        let payload = render_multi(&sections);
        assert_eq!(payload.text, "Status: 2 apps across 2 hosts");
        let blocks = payload.blocks.expect("structured");
        let tables: Vec<_> = blocks
            .iter()
            .filter(|block| matches!(block, LayoutBlock::Table(_)))
            .collect();
        assert_eq!(tables.len(), 2);
        let LayoutBlock::Table(rows) = tables[0] else { unreachable!() };
        assert_eq!(rows[0][1], "APP");
        assert_eq!(rows[1][0], "🟢");
    }

    #[test]
    fn component_layout_includes_main_row() {
        let sections = parse_component_report(
            "App: BEP\nService: bep.service\nMain-State: active\nComponent: worker\nState: failed\n",
        );
        let payload = render_component(&sections);
        let blocks = payload.blocks.expect("structured");
        let LayoutBlock::Table(rows) = blocks.last().expect("table") else {
            panic!("expected table block");
        };
        assert_eq!(rows[1][1], "MAIN");
        assert_eq!(rows[2][1], "worker");
        assert_eq!(rows[2][0], "🔴");
    }

    #[test]
    fn url_layout_fields() {
        let clean = "URL: https://x/health\nHTTP: 302\nTime: 1.2s\n";
        let payload = render_url(&parse_url_probe(clean), clean);
        let blocks = payload.blocks.expect("structured");
        let LayoutBlock::Fields(fields) = &blocks[1] else {
            panic!("expected field block");
        };
        assert_eq!(fields[1].1, "🟡 302");
        assert_eq!(fields[2].1, "1.2s");
    }

    #[test]
    fn raw_without_summary_is_just_fenced() {
        let payload = render_raw("some output", None);
        assert_eq!(payload.text, "```some output```");
        assert!(payload.blocks.is_none());
    }

    #[test]
    fn raw_with_recovered_headers_gets_summary_line() {
        let report = parse_single_unit("Client: ACME\nHost: h1\nActive: failed\n");
        let payload = render_raw("boom", Some(&report));
        assert!(payload.text.starts_with("🔴 *ACME*"));
        assert!(payload.text.contains("*Status:* *FAILED*"));
        assert!(payload.text.ends_with("```boom```"));
    }

    #[test]
    fn raw_with_empty_summary_is_unannotated() {
        let report = SingleUnitReport {
            headers: HeaderFields::default(),
            state: ServiceState::Unknown,
            ..Default::default()
        };
        let payload = render_raw("text", Some(&report));
        assert_eq!(payload.text, "```text```");
    }

    #[test]
    fn raw_never_produces_empty_text() {
        let payload = render_raw("", None);
        assert_eq!(payload.text, "```(no output)```");
    }

    #[test]
    fn table_rows_are_capped() {
        let mut text = String::from("Host: big\n");
        for i in 0..200 {
            text.push_str(&format!("APP: app-{i}\n  State: active\n"));
        }
        let sections = parse_multi_section(&text);
        let payload = render_multi(&sections);
        let total_rows: usize = payload
            .blocks
            .expect("structured")
            .iter()
            .filter_map(|block| match block {
                LayoutBlock::Table(rows) => Some(rows.len()),
                _ => None,
            })
            .sum();
        assert_eq!(total_rows, MAX_TABLE_ROWS);
    }

    #[test]
    fn long_cells_get_ellipsis() {
        let long_name = "a".repeat(40);
        let sections = parse_multi_section(&format!("Host: h\nAPP: {long_name}\n"));
        let payload = render_multi(&sections);
        let blocks = payload.blocks.expect("structured");
        let LayoutBlock::Table(rows) = blocks.last().expect("table") else {
            panic!("expected table block");
        };
        assert_eq!(rows[1][1].chars().count(), MAX_CELL_CHARS + 1);
        assert!(rows[1][1].ends_with('…'));
    }
}
