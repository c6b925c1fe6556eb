use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use backend::{ClientMessage, Driver, EventSink, GameRegistry, JsonLinesSink, ServerConfig, ServerMessage};

/// Reads client messages as JSON lines on stdin and writes server messages as
/// JSON lines on stdout. Logs go to stderr.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = ServerConfig::from_env().context("loading server configuration")?;
    info!("[BACKEND] Starting with {:?}", config);

    let registry = Arc::new(GameRegistry::new());
    let sink: Arc<dyn EventSink> = Arc::new(JsonLinesSink::new(std::io::stdout()));
    let driver = Driver::new(config, registry.clone(), sink.clone());
    let ticking = tokio::spawn(driver.run());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        if line.trim().is_empty() {
            continue;
        }
        let reply = match serde_json::from_str::<ClientMessage>(&line) {
            Ok(message) => registry.handle(message),
            Err(e) => ServerMessage::Error {
                message: format!("Unreadable message: {}", e),
            },
        };
        sink.emit(reply);
    }

    info!("[BACKEND] stdin closed, shutting down");
    ticking.abort();
    Ok(())
}
