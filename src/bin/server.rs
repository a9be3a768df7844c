//! Operations Support HTTP Server Binary
//!
//! This is the main entry point for the REST API server backing the
//! space-weather operations dashboard. It loads the configuration, seeds the
//! in-memory store (optionally preloading a forecast feed from disk), and
//! starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin swops-server --features http-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `SWOPS_CONFIG`: Path to a TOML config file (default: ./swops.toml)
//! - `SWOPS_FEED_PATH`: Forecast CSV to preload at startup
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use swops_rust::config::AppConfig;
use swops_rust::http::{create_router, AppState};
use swops_rust::models::feed::parse_forecast_csv;
use swops_rust::store::{default_unit_profile, OpsStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting operations support HTTP server");

    let config = AppConfig::load();

    let store = OpsStore::new(default_unit_profile());

    // Preload a forecast snapshot when one is configured; the server still
    // starts without it and accepts uploads over the API.
    if let Some(feed_path) = &config.feed_path {
        match std::fs::read_to_string(feed_path) {
            Ok(text) => match parse_forecast_csv(&text) {
                Ok(series) => {
                    info!(
                        "Preloaded forecast feed from {} ({} samples)",
                        feed_path,
                        series.len()
                    );
                    store.replace_forecast(series);
                }
                Err(e) => warn!("Failed to parse forecast feed {}: {:#}", feed_path, e),
            },
            Err(e) => warn!("Failed to read forecast feed {}: {}", feed_path, e),
        }
    }

    // Create application state
    let state = AppState::new(store);

    // Create router with all endpoints
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("Server listening on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
