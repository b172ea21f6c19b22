//! Virtual host server.
//!
//! Serves each configured virtual host from the same listener, dispatching on
//! the request hostname.
//!
//! ```text
//!     Client Request
//!     ──────────────▶ TraceLayer ──▶ vhost[0] ──▶ vhost[1] ──▶ ... ──▶ 404 fallback
//!                                       │            │
//!                                     match        match
//!                                       ▼            ▼
//!                                    handler      handler
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use vhost_router::config::{load_config, VhostServerConfig};
use vhost_router::http::HttpServer;
use vhost_router::lifecycle::Shutdown;
use vhost_router::observability::logging;

#[derive(Parser)]
#[command(name = "vhost-router")]
#[command(about = "Serve virtual hosts matched by hostname pattern", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let cli = Cli::parse();

    tracing::info!("vhost-router v{} starting", env!("CARGO_PKG_VERSION"));

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => VhostServerConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        vhosts = config.vhosts.len(),
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(config)?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        shutdown.trigger_on_ctrl_c().await;
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
