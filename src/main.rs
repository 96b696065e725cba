use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use devx_mood::api::{build_app, AppState};
use devx_mood::config::{self, ProcessEnv};
use devx_mood::{MoodPipeline, SensorClient, SnapshotStore};

#[derive(Debug, Parser)]
#[command(name = "devx-mood", about = "Team mood dashboard backed by the sensor APIs")]
struct Args {
    /// addr to bind to
    #[arg(long, env = "MOOD_ADDR", default_value = ":8080")]
    addr: String,
}

// =================== Main ===================
#[tokio::main]
async fn main() -> Result<()> {
    // init tracing from env MOOD_LOG or RUST_LOG
    let filter = std::env::var("MOOD_LOG")
        .unwrap_or_else(|_| std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()));
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args = Args::parse();
    let addr = config::parse_listen_addr(&args.addr).map_err(anyhow::Error::msg)?;

    let timeout = config::upstream_timeout();
    let client = SensorClient::new(timeout).context("build sensor HTTP client")?;
    let store = Arc::new(SnapshotStore::new());
    let state = AppState::new(MoodPipeline::new(client, store), Arc::new(ProcessEnv));
    let app = build_app(state);

    info!(listen = %addr, upstream_timeout_secs = timeout.as_secs(), "DevX mood analyzer starting up");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await
        .context("server error")?;

    Ok(())
}
