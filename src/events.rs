use std::io::{self, Write};

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub fn init_logging(cfg: &Config) -> Result<()> {
    let filter =
        EnvFilter::try_new(cfg.log_level.clone()).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Emits machine-readable invocation events on stderr when `--json-events`
/// is set. Off by default; a disabled emitter is a no-op.
#[derive(Clone, Debug)]
pub struct EventEmitter {
    json_events: bool,
}

impl EventEmitter {
    pub fn new(json_events: bool) -> Self {
        Self { json_events }
    }

    pub fn emit<T: Serialize>(&self, event_type: &str, payload: T) {
        if !self.json_events {
            return;
        }

        let line = json!({
            "ts": Utc::now().to_rfc3339(),
            "type": event_type,
            "payload": payload,
        });

        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr, "{}", line);
    }
}
