use anyhow::{Context, Result};
use clap::Parser;
use net_studio::cli::{handle_command, Cli};
use std::fs::OpenOptions;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_LOG_FILE: &str = "/tmp/net-studio.log";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Stdout belongs to the command output, so logs go to a file.
    let log_path = std::env::var("NET_STUDIO_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path))?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_writer(file)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("net_studio=info,rocket=warn")),
        )
        .init();

    handle_command(cli).await
}
