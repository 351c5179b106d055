//! chat-widget: interactive terminal chat against the Answer Service.

use anyhow::{Context, Result};
use chat_widget_client::config;
use std::sync::Mutex;

/// Send logs to `~/.chat-widget/chat-widget.log`; stderr belongs to the screen.
fn init_logging() {
    let Some(dir) = config::config_dir() else {
        return;
    };
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("chat-widget.log"))
    {
        Ok(f) => f,
        Err(_) => return,
    };
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config_path = config::resolve_config_path(&args)?;
    let cfg = config::load_or_default(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;

    init_logging();
    tracing::info!(url = cfg.api_url(), "starting chat widget");

    chat_widget_tui::run(&cfg).await
}
