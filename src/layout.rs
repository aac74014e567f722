//! Rendering-mode selection.
//!
//! One decision policy, evaluated in order with the most structurally
//! specific status shape checked first (component, then multi-app, then
//! single unit). Parsers that find no structure push the decision back to
//! RAW; nothing here ever fails.

use crate::command::CommandPlan;
use crate::component::{has_component_marker, parse_component_report, ComponentSection};
use crate::multi_section::{has_multi_app_marker, parse_multi_section, HostSection};
use crate::single_unit::{parse_single_unit, SingleUnitReport};
use crate::state::ServiceState;
use crate::url_probe::{parse_url_probe, UrlProbeReport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportShape {
    Raw,
    Url(UrlProbeReport),
    Component(Vec<ComponentSection>),
    MultiApp(Vec<HostSection>),
    Single(SingleUnitReport),
}

pub fn select_shape(plan: &CommandPlan, clean: &str) -> ReportShape {
    if plan.force_raw() {
        return ReportShape::Raw;
    }
    // Without live execution the text came from a cached path; nothing
    // structured to trust.
    if !plan.exec_mode() {
        return ReportShape::Raw;
    }

    match plan.subcommand() {
        "info" => ReportShape::Raw,
        "url" => ReportShape::Url(parse_url_probe(clean)),
        "status" => select_status_shape(clean),
        _ => ReportShape::Raw,
    }
}

fn select_status_shape(clean: &str) -> ReportShape {
    if has_component_marker(clean) {
        let sections = parse_component_report(clean);
        if sections.is_empty() {
            return ReportShape::Raw;
        }
        return ReportShape::Component(sections);
    }

    if has_multi_app_marker(clean) {
        let sections = parse_multi_section(clean);
        if sections.is_empty() {
            return ReportShape::Raw;
        }
        return ReportShape::MultiApp(sections);
    }

    let report = parse_single_unit(clean);
    if report.state == ServiceState::Unknown {
        return ReportShape::Raw;
    }
    ReportShape::Single(report)
}
