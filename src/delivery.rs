//! Delivery channel collaborator.
//!
//! Converts a [`RenderPayload`] into the chat platform's message shape
//! (fallback `text` plus optional Block Kit `blocks`) and posts it to the
//! response webhook. The engine never sees any of this; payloads are final by
//! the time they arrive here.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde_json::{json, Value};

use crate::render::{LayoutBlock, RenderPayload};

/// Platform limit on fields per section block.
const MAX_SECTION_FIELDS: usize = 10;

/// Build the chat message body for one payload.
pub fn to_chat_message(payload: &RenderPayload) -> Value {
    let mut message = json!({ "text": payload.text });
    if let Some(blocks) = &payload.blocks {
        let rendered: Vec<Value> = blocks.iter().map(block_to_json).collect();
        message["blocks"] = Value::Array(rendered);
    }
    message
}

fn block_to_json(block: &LayoutBlock) -> Value {
    match block {
        LayoutBlock::Header(title) => json!({
            "type": "header",
            "text": { "type": "plain_text", "text": title, "emoji": true },
        }),
        LayoutBlock::Markup(text) => json!({
            "type": "section",
            "text": { "type": "mrkdwn", "text": text },
        }),
        LayoutBlock::Fields(pairs) => {
            let fields: Vec<Value> = pairs
                .iter()
                .take(MAX_SECTION_FIELDS)
                .map(|(label, value)| {
                    json!({ "type": "mrkdwn", "text": format!("*{label}:*\n{value}") })
                })
                .collect();
            json!({ "type": "section", "fields": fields })
        }
        LayoutBlock::Divider => json!({ "type": "divider" }),
        LayoutBlock::Table(rows) => json!({
            "type": "section",
            "text": { "type": "mrkdwn", "text": format!("```{}```", format_table(rows)) },
        }),
    }
}

/// Space-align table cells column by column for a fenced monospace block.
fn format_table(rows: &[Vec<String>]) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in rows {
        let mut line = String::new();
        for (i, cell) in row.iter().enumerate() {
            line.push_str(cell);
            if i + 1 < row.len() {
                let pad = widths[i].saturating_sub(cell.chars().count()) + 2;
                line.extend(std::iter::repeat(' ').take(pad));
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out.truncate(out.trim_end().len());
    out
}

#[derive(Debug, Clone)]
pub struct DeliveryChannel {
    client: reqwest::Client,
    webhook_url: String,
}

impl DeliveryChannel {
    pub fn new(webhook_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("failed to build delivery HTTP client")?;
        Ok(Self {
            client,
            webhook_url: webhook_url.into(),
        })
    }

    pub async fn post(&self, payload: &RenderPayload) -> Result<()> {
        let body = to_chat_message(payload);
        let response = self
            .client
            .post(&self.webhook_url)
            .json(&body)
            .send()
            .await
            .context("webhook request failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("webhook rejected payload: {status}");
        }
        tracing::debug!(status = %status, "payload delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_only_payload_has_no_blocks_key() {
        let message = to_chat_message(&RenderPayload::text_only("```out```"));
        assert_eq!(message["text"], "```out```");
        assert!(message.get("blocks").is_none());
    }

    #[test]
    fn blocks_map_to_platform_shapes() {
        let payload = RenderPayload {
            text: "fallback".into(),
            blocks: Some(vec![
                LayoutBlock::Header("Status Result".into()),
                LayoutBlock::Markup("🟢 *BEP*".into()),
                LayoutBlock::Divider,
                LayoutBlock::Fields(vec![("Service".into(), "`bep.service`".into())]),
            ]),
        };
        let message = to_chat_message(&payload);
        let blocks = message["blocks"].as_array().expect("blocks array");
        assert_eq!(blocks[0]["type"], "header");
        assert_eq!(blocks[0]["text"]["text"], "Status Result");
        assert_eq!(blocks[1]["text"]["type"], "mrkdwn");
        assert_eq!(blocks[2]["type"], "divider");
        assert_eq!(blocks[3]["fields"][0]["text"], "*Service:*\n`bep.service`");
    }

    #[test]
    fn field_blocks_are_capped_at_platform_limit() {
        let pairs: Vec<(String, String)> =
            (0..15).map(|i| (format!("L{i}"), format!("v{i}"))).collect();
        let message = to_chat_message(&RenderPayload {
            text: "x".into(),
            blocks: Some(vec![LayoutBlock::Fields(pairs)]),
        });
        assert_eq!(message["blocks"][0]["fields"].as_array().unwrap().len(), 10);
    }

    #[test]
    fn tables_become_fenced_aligned_text() {
        let rows = vec![
            vec!["".into(), "APP".into(), "STATE".into()],
            vec!["🟢".into(), "BEP".into(), "active".into()],
        ];
        let message = to_chat_message(&RenderPayload {
            text: "x".into(),
            blocks: Some(vec![LayoutBlock::Table(rows)]),
        });
        let text = message["blocks"][0]["text"]["text"].as_str().unwrap();
        assert!(text.starts_with("```"));
        assert!(text.contains("APP"));
        assert!(text.contains("🟢"));
    }

    #[tokio::test]
    async fn posts_payload_to_webhook() {
        let server = httpmock::MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(httpmock::Method::POST)
                    .path("/hook")
                    .json_body_partial(r#"{"text": "hello"}"#);
                then.status(200);
            })
            .await;

        let channel = DeliveryChannel::new(server.url("/hook")).expect("client");
        channel
            .post(&RenderPayload::text_only("hello"))
            .await
            .expect("delivered");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn webhook_rejection_is_an_error() {
        let server = httpmock::MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(httpmock::Method::POST).path("/hook");
                then.status(500);
            })
            .await;

        let channel = DeliveryChannel::new(server.url("/hook")).expect("client");
        let result = channel.post(&RenderPayload::text_only("hello")).await;
        assert!(result.is_err());
    }
}
