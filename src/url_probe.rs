//! Parser for the `url` health-check report.

use crate::scan::label_value;
use crate::state::Badge;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlProbeReport {
    pub url: Option<String>,
    pub http_code: Option<String>,
    pub elapsed_secs: Option<String>,
}

pub fn parse_url_probe(text: &str) -> UrlProbeReport {
    let mut report = UrlProbeReport::default();
    for line in text.lines() {
        if report.url.is_none() {
            if let Some(url) = label_value(line, "URL") {
                report.url = non_empty(url);
            }
        }
        if report.http_code.is_none() {
            if let Some(code) = label_value(line, "HTTP") {
                report.http_code = non_empty(code);
            }
        }
        if report.elapsed_secs.is_none() {
            if let Some(time) = label_value(line, "Time") {
                report.elapsed_secs = non_empty(time.trim_end_matches('s'));
            }
        }
    }
    report
}

/// 2xx is healthy, 3xx is a redirect worth a look, any other code is a
/// failure. A missing or unparsable code is only red when the probe text
/// itself mentions an error.
pub fn http_badge(report: &UrlProbeReport, text: &str) -> Badge {
    match report
        .http_code
        .as_deref()
        .and_then(|code| code.trim().parse::<u16>().ok())
    {
        Some(code) if (200..300).contains(&code) => Badge::Green,
        Some(code) if (300..400).contains(&code) => Badge::Yellow,
        Some(_) => Badge::Red,
        None => {
            if text.to_ascii_lowercase().contains("error") {
                Badge::Red
            } else {
                Badge::Gray
            }
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
