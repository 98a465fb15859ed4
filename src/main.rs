/// Drone flight request service entry point
mod clients;
mod config;
mod domain;
mod errors;
mod handlers;
mod routes;
mod services;
mod utils;

use crate::clients::{FlightLogClient, FlightLogger, LicenseClient, ZoneTableLogger};
use crate::config::AppConfig;
use crate::handlers::AppState;
use crate::routes::build_router;
use crate::services::SubmissionOrchestrator;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    // Load configuration
    let config = AppConfig::from_env()?;
    info!("Configuration loaded successfully");

    let timeout = Duration::from_secs(config.http_timeout_seconds);

    // Initialize collaborators
    let verifier = Arc::new(LicenseClient::new(config.license_verify_url.clone(), timeout)?);
    let logger = build_flight_logger(&config, timeout)?;

    let orchestrator = Arc::new(SubmissionOrchestrator::new(verifier, logger));
    let app = build_router(AppState { orchestrator });

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("drone_flight_log listening on {}", config.bind_addr);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

/// Remote logging service when configured, local zone table otherwise
fn build_flight_logger(
    config: &AppConfig,
    timeout: Duration,
) -> anyhow::Result<Arc<dyn FlightLogger>> {
    if let Some(url) = &config.flight_log_url {
        info!("Flight logging via {}", url);
        return Ok(Arc::new(FlightLogClient::new(url.clone(), timeout)?));
    }

    let table = match &config.restricted_zones_path {
        Some(path) => ZoneTableLogger::from_file(path)?,
        None => ZoneTableLogger::default(),
    };
    warn!(
        zones = table.zones().len(),
        "FLIGHT_LOG_URL not set, evaluating flights against local zone table"
    );
    Ok(Arc::new(table))
}
