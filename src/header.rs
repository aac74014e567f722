//! Header-field extraction.
//!
//! Most tool reports open with a small labeled block (Client/Host/Env/App/
//! Service/RunAs). All labels are sought in one pass over the lines; the first
//! occurrence of each label wins and later duplicates are ignored.

use crate::scan::label_value;

pub const HEADER_LABELS: [&str; 6] = ["Client", "Host", "Env", "App", "Service", "RunAs"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderFields {
    pub client: Option<String>,
    pub host: Option<String>,
    pub env: Option<String>,
    pub app: Option<String>,
    pub service: Option<String>,
    pub run_as: Option<String>,
}

impl HeaderFields {
    pub fn is_empty(&self) -> bool {
        self.client.is_none()
            && self.host.is_none()
            && self.env.is_none()
            && self.app.is_none()
            && self.service.is_none()
            && self.run_as.is_none()
    }

    fn slot(&mut self, label: &str) -> &mut Option<String> {
        match label {
            "Client" => &mut self.client,
            "Host" => &mut self.host,
            "Env" => &mut self.env,
            "App" => &mut self.app,
            "Service" => &mut self.service,
            "RunAs" => &mut self.run_as,
            _ => unreachable!("label set is fixed"),
        }
    }
}

pub fn extract_headers(text: &str) -> HeaderFields {
    let mut fields = HeaderFields::default();
    for line in text.lines() {
        for label in HEADER_LABELS {
            if let Some(value) = label_value(line, label) {
                let slot = fields.slot(label);
                if slot.is_none() && !value.is_empty() {
                    *slot = Some(value.to_string());
                }
            }
        }
    }
    fields
}
