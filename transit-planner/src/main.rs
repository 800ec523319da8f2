use std::process::ExitCode;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use transit_planner::config::ServerConfig;
use transit_planner::crowd::{CrowdConfig, CrowdEstimator, RidershipRecord, spawn_crowd_updates};
use transit_planner::dataset::load_latest_ridership;
use transit_planner::geocode::{NominatimConfig, NominatimGeocoder};
use transit_planner::network::SharedNetwork;
use transit_planner::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    // Stations are required; fail fast if the snapshot is unusable
    let network = match SharedNetwork::load(config.stations_path.clone()) {
        Ok(network) => network,
        Err(e) => {
            error!(path = %config.stations_path.display(), error = %e, "Failed to load stations");
            return ExitCode::FAILURE;
        }
    };
    info!(stations = network.len().await, "Loaded station network");

    let ridership = load_latest_ridership(&config.ridership_path).unwrap_or_else(|e| {
        warn!(
            path = %config.ridership_path.display(),
            error = %e,
            "Ridership unavailable, using fallback figures"
        );
        RidershipRecord::fallback()
    });
    let crowd = CrowdEstimator::new(ridership, CrowdConfig::default());

    let mut geocoder_config = NominatimConfig::default();
    if let Some(url) = &config.nominatim_url {
        geocoder_config = geocoder_config.with_base_url(url);
    }
    let geocoder = match NominatimGeocoder::new(geocoder_config) {
        Ok(geocoder) => geocoder,
        Err(e) => {
            error!(error = %e, "Failed to create geocoder");
            return ExitCode::FAILURE;
        }
    };

    let state = AppState::new(network, geocoder, crowd);
    spawn_crowd_updates(state.network.clone(), state.crowd.clone(), config.crowd_refresh);

    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.bind_addr, error = %e, "Failed to bind");
            return ExitCode::FAILURE;
        }
    };
    info!(addr = %config.bind_addr, "Transit planner listening");
    info!("  GET  /health                 - Health check");
    info!("  POST /journey/plan           - Plan a journey");
    info!("  GET  /api/stations/nearest   - Nearest station to lat/lng");
    info!("  GET  /api/stations/search    - Resolve a free-text location");
    info!("  GET  /api/transfer           - Interchange between two lines");
    info!("  POST /api/network/reload     - Reload station dataset");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server error");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
