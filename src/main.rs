use anyhow::Result;
use clap::Parser;
use serde_json::json;
use uuid::Uuid;

use appctl_bridge::{
    config::Config,
    delivery::{to_chat_message, DeliveryChannel},
    engine::Engine,
    events::{init_logging, EventEmitter},
    runner::ToolRunner,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::parse();
    init_logging(&cfg)?;
    tracing::info!(
        tool_bin = %cfg.tool_bin,
        tool_home = ?cfg.tool_home,
        timeout_secs = cfg.timeout,
        "starting appctl bridge"
    );

    let emitter = EventEmitter::new(cfg.json_events);
    let engine = Engine::new(cfg.engine_config());
    let runner = ToolRunner::new(cfg.runner_config());

    let invocation_id = Uuid::new_v4();
    let text = cfg.command_text();
    emitter.emit(
        "command_received",
        json!({ "invocation_id": invocation_id, "text": text }),
    );

    let payload = match engine.plan(&text) {
        Ok(None) => engine.usage(),
        Err(error) => {
            tracing::warn!(%error, "command rejected");
            engine.rejection(&error)
        }
        Ok(Some(plan)) => match runner.run(&plan.tool_argv()).await {
            Ok(output) => {
                emitter.emit(
                    "tool_exit",
                    json!({ "invocation_id": invocation_id, "exit_code": output.exit_code }),
                );
                engine.respond(&plan, &output)
            }
            Err(error) => {
                tracing::error!(%error, "control tool did not complete");
                engine.failure(&error)
            }
        },
    };

    emitter.emit(
        "payload_built",
        json!({ "invocation_id": invocation_id, "structured": payload.blocks.is_some() }),
    );

    match &cfg.webhook_url {
        Some(url) => DeliveryChannel::new(url.clone())?.post(&payload).await?,
        None => println!("{}", serde_json::to_string_pretty(&to_chat_message(&payload))?),
    }

    Ok(())
}
