//! Route planning HTTP service binary.
//!
//! # Configuration
//!
//! - `FLIGHTPATH_DATA_DIR` - Directory holding `airports.dat` and `routes.dat`
//! - `FLIGHTPATH_MAX_LAYOVERS`, `FLIGHTPATH_GROUND_HOP_KM`,
//!   `FLIGHTPATH_SEARCH_BUDGET` - Routing settings
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `SERVICE_PORT` - HTTP port (default: 8080)
//! - `METRICS_ENABLED`, `METRICS_PATH` - Prometheus endpoint settings

use std::env;
use std::net::SocketAddr;

use flightpath_lib::{EdgeKind, RoutingConfig};
use flightpath_service_shared::{
    init_logging, init_metrics, AppState, LoggingConfig, MetricsConfig,
};
use tracing::{error, info};

const DEFAULT_PORT: u16 = 8080;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_service("route");
    init_logging(&logging_config);

    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        tracing::warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let port: u16 = env::var("SERVICE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let config = RoutingConfig::from_env().inspect_err(|e| {
        error!(error = %e, "invalid routing configuration");
    })?;

    info!(
        port,
        max_layovers = config.max_layovers,
        ground_hop_km = config.ground_hop_threshold_km,
        "starting route service"
    );

    let state = AppState::load(None, config).inspect_err(|e| {
        error!(error = %e, "failed to load application state");
    })?;

    info!(
        airports = state.network().locations.len(),
        flights = state.graph().edge_count(EdgeKind::Flight),
        ground_hops = state.graph().edge_count(EdgeKind::Ground),
        "application state loaded"
    );

    let app = flightpath_service_route::app(state, &metrics_config.path);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
