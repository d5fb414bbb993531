//! Store Monitor HTTP Server Binary
//!
//! This is the main entry point for the report REST API server. It
//! initializes the repository, loads the seed CSVs, sets up the HTTP
//! router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! STATUS_PATH=data/store_status.csv \
//! TIMEZONE_PATH=data/timezones.csv \
//! HOURS_PATH=data/menu_hours.csv \
//!   cargo run --bin store-monitor-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `STATUS_PATH` / `TIMEZONE_PATH` / `HOURS_PATH`: seed CSV paths
//! - `REPORT_REFERENCE_TIME`: optional pinned "now" for report windows
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use store_monitor::db::{self, LocalRepository, SeedLoader};
use store_monitor::http::{create_router, AppState};

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

    info!("Starting Store Monitor HTTP Server");

    // Construct the repository once and inject it everywhere it is needed
    let repository = Arc::new(LocalRepository::new());

    let seed_config = db::SeedConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;
    let summary = SeedLoader::new(seed_config).migrate(repository.as_ref()).await?;
    info!(
        observations = summary.observations,
        timezones = summary.timezones,
        windows = summary.windows,
        "Seed data loaded"
    );

    let clock = db::report_clock_from_env().map_err(|e| anyhow::anyhow!(e))?;
    info!(?clock, "Report reference clock resolved");

    // Create application state
    let state = AppState::new(repository, clock);

    // Create router with all endpoints
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
