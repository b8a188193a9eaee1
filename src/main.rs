// ABOUTME: Entry point for the roster binary.
// ABOUTME: Parses CLI arguments, initializes tracing, opens the store, and serves the HTTP API.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use roster_server::{AppState, Config, create_router, release, serve, shutdown_signal};
use roster_store::SqliteStore;
use tokio::net::TcpListener;

/// Used when `RUST_LOG` is unset. `roster` also matches the `roster_*` crates.
const DEFAULT_LOG_FILTER: &str = "roster=debug,tower_http=debug";

/// Student record service.
#[derive(Debug, Parser)]
#[command(name = "roster", version, about)]
struct Cli {
    /// Path to the YAML config file. CONFIG_PATH takes precedence when set.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .init();

    let cli = Cli::parse();
    let config_path = Config::resolve_path(cli.config)?;
    let config = Config::load(&config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    let store = Arc::new(SqliteStore::open(&config.storage_path)?);
    tracing::info!(
        env = %config.env,
        storage_path = %config.storage_path.display(),
        "database setup successfully"
    );

    let state = Arc::new(AppState::new(store.clone()));
    let app = create_router(state);

    let listener = TcpListener::bind(&config.http_server.address)
        .await
        .with_context(|| format!("binding {}", config.http_server.address))?;
    tracing::info!(address = %config.http_server.address, "server is started");

    let outcome = serve(listener, app, shutdown_signal(), config.shutdown_timeout()).await?;

    if release(store) {
        tracing::info!("storage released");
    } else {
        tracing::warn!(
            ?outcome,
            "in-flight requests still hold the store; it is released when the runtime stops"
        );
    }
    Ok(())
}
