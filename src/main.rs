// Main entry point - Dependency injection and poller startup
use std::sync::{Arc, Mutex};
use std::time::Duration;

use farmwatch_telemetry::application::admin_service::AdminViewModel;
use farmwatch_telemetry::application::monitoring_service::MonitoringViewModel;
use farmwatch_telemetry::application::poller::Poller;
use farmwatch_telemetry::application::session::DashboardSession;
use farmwatch_telemetry::infrastructure::config::load_config;
use farmwatch_telemetry::infrastructure::rest_repository::RestTelemetryRepository;
use farmwatch_telemetry::presentation::headless::{HeadlessChart, HeadlessMap};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let cfg = load_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(RestTelemetryRepository::new(&cfg.endpoint.base_url));

    // Create view models (application layer)
    let monitoring = MonitoringViewModel::new(
        Box::new(HeadlessChart::new("live-temperature")),
        Box::new(HeadlessChart::new("live-heart-rate")),
        Box::new(HeadlessMap::new(
            cfg.map.default_lat,
            cfg.map.default_lon,
            cfg.map.default_zoom,
        )),
    );
    let admin = AdminViewModel::new(
        Box::new(HeadlessChart::new("history-temperature")),
        Box::new(HeadlessChart::new("history-heart-rate")),
        Box::new(HeadlessMap::new(
            cfg.map.default_lat,
            cfg.map.default_lon,
            cfg.map.default_zoom,
        )),
    );

    let session = Arc::new(Mutex::new(DashboardSession::new(monitoring, admin)));

    // Start the two refresh loops
    let poller = Poller::new(
        repository,
        session.clone(),
        Duration::from_secs(cfg.poll.monitoring_secs),
        Duration::from_secs(cfg.poll.metadata_secs),
    );
    let _handles = poller.spawn();

    tracing::info!(
        endpoint = %cfg.endpoint.base_url,
        "farmwatch telemetry dashboard started"
    );

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");

    Ok(())
}
