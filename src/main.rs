//! Upstream Status Collector Binary

use clap::Parser;
use status_collector::render::render_indicator;
use status_collector::{
    HttpTransport, Result, VisibilityConfig, default_directory, load_config, save_config,
    select_and_gather_all,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "status_collector", version, about = "Poll upstream status pages and report their health")]
struct Cli {
    /// Path to the visibility configuration file
    #[arg(long, env = "STATUS_CONFIG_PATH", default_value = "status_config.json")]
    config: PathBuf,

    /// HTTP timeout per fetch, in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Maximum retry attempts per fetch
    #[arg(long, default_value_t = 2)]
    max_retries: u32,

    /// Retry backoff base, in milliseconds
    #[arg(long, default_value_t = 500)]
    retry_backoff_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    initialize_tracing();

    let cli = Cli::parse();
    let directory = default_directory();

    // First run: materialize an all-shown config so the user has a file
    // to edit. Later runs: load and validate before gathering anything.
    let config = if cli.config.exists() {
        match load_config(&cli.config) {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load config {}: {}", cli.config.display(), e);
                std::process::exit(1);
            }
        }
    } else {
        info!(
            "No config at {}, generating one with all services shown",
            cli.config.display()
        );
        let config = VisibilityConfig::generate_all(&directory);
        save_config(&config, &cli.config)?;
        config
    };

    for key in config.unknown_keys(&directory) {
        warn!("Config key '{}' has no matching service and is ignored", key);
    }

    let transport = HttpTransport::new(
        Duration::from_secs(cli.timeout_secs),
        cli.max_retries,
        cli.retry_backoff_ms,
    )?;

    let consumer = |indicator| render_indicator(&indicator);
    select_and_gather_all(&transport, &config, &directory, &consumer).await;

    Ok(())
}

/// Initialize structured logging
fn initialize_tracing() {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&log_level))
        .unwrap();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
