//! HTTP server for the Ferie Engine.
//!
//! Logs are controlled via the `RUST_LOG` environment variable
//! (default: `ferie_engine=info`).

use std::error::Error;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use ferie_engine::api::{AppState, create_router};
use ferie_engine::config::ConfigLoader;
use ferie_engine::store::JsonFileStore;

#[derive(Parser)]
#[command(name = "ferie-engine")]
#[command(about = "Vacation-pay entitlement calculator and worker registry", long_about = None)]
struct Cli {
    /// Address to listen on
    #[arg(short, long, default_value = "127.0.0.1:3000")]
    addr: SocketAddr,

    /// Directory holding engine.yaml and profiles.yaml
    #[arg(short, long, default_value = "./config")]
    config: PathBuf,

    /// Worker document path
    #[arg(short, long, default_value = "./data/workers.json")]
    data: PathBuf,
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ferie_engine=info,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_line_number(true))
        .init();
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging();

    let config = ConfigLoader::load(&cli.config)?;
    info!(
        config = %cli.config.display(),
        profiles = config.profiles().len(),
        "Configuration loaded"
    );

    let store = Arc::new(JsonFileStore::new(&cli.data));
    info!(data = %store.path().display(), "Using worker document");

    let app = create_router(AppState::new(config, store));

    let listener = tokio::net::TcpListener::bind(cli.addr).await?;
    info!(addr = %cli.addr, "Ferie engine listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
