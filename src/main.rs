//! Soil moisture navigation host.
//!
//! Serves the single-page application in history mode: every deep link the
//! route table recognises gets the application shell, everything else gets
//! an explicit 404 (or the configured redirect).
//!
//! ```text
//!     Browser request
//!     ───────────────▶ http::server ──▶ routing::Router ──▶ Matched  → index.html
//!                          │                            ├─▶ Redirect → 302
//!                          │                            └─▶ NotFound → 404
//!                          ├─▶ /api/resolve, /api/routes (JSON)
//!                          └─▶ <base>assets/* (static files)
//! ```

use std::path::PathBuf;
use clap::Parser;
use tokio::net::TcpListener;

use soil_moisture_nav::config::{load_config, NavConfig};
use soil_moisture_nav::lifecycle::{build_router, signals, Shutdown};
use soil_moisture_nav::observability::{logging, metrics};
use soil_moisture_nav::HttpServer;

#[derive(Parser)]
#[command(name = "soil-moisture-nav")]
#[command(about = "History-mode host for the soil moisture records application", long_about = None)]
struct Args {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long, env = "NAV_CONFIG")]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => NavConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability.log_level);
    tracing::info!("soil-moisture-nav v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        config_file = ?args.config,
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        index_path = %config.spa.index_path,
        "Configuration loaded"
    );

    let router = build_router(&config)?;

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(&shutdown);

    let server = HttpServer::new(config, router);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
