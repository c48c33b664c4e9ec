//! Bullion quote server
//!
//! Serves current quotes, history and recommendations while a background
//! task keeps the quote cache fresh.

use dotenvy::dotenv;
use bullion::config::AppConfig;
use bullion::core::http::{start_server, AppState};
use bullion::core::scheduler::RefreshScheduler;
use bullion::logging;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = AppConfig::from_env()?;
    info!("Starting Bullion quote server");
    info!(environment = %config.environment, "Environment");
    info!(source = ?config.source, url = ?config.source_url, "Quote source");
    info!(
        refresh_secs = config.refresh_interval.as_secs(),
        lookback_days = config.lookback_days,
        "Refresh policy"
    );

    let state = AppState::from_config(&config)?;

    info!("Initial quote refresh...");
    let outcome = state.cache.refresh_if_stale().await;
    info!(?outcome, "Initial quote refresh finished");

    let scheduler = RefreshScheduler::new(state.cache.clone(), config.refresh_interval)?;
    scheduler.start().await;

    let port = config.port;
    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(state, port).await {
            error!(error = %e, "HTTP server error");
        }
    });

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    scheduler.stop().await;
    Ok(())
}
