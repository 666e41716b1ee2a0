use anyhow::{Context, Result};
use clap::Parser;
use job_board::cli::{handle_command, Cli};
use job_board::{ApiClient, ClientConfig};
use std::fs::OpenOptions;
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ClientConfig::load(cli.config.as_deref())?.with_api_base_url(cli.api_url);

    // Logs go to a file so they never interleave with terminal output
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&config.log_file)
        .with_context(|| format!("Failed to open log file {}", config.log_file.display()))?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_writer(file)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Backend: {}", config.api_base_url);
    info!("Request timeout: {}s", config.timeout_seconds);

    let client = ApiClient::new(&config.api_base_url, config.timeout_seconds)?;
    handle_command(cli.command, client).await
}
