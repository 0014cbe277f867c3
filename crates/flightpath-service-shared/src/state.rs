//! Application state shared by the axum handlers.

use std::path::Path;
use std::sync::Arc;

use flightpath_lib::{
    build_network_graph, load_network, resolve_data_dir, Error as LibError, Graph, Network,
    RoutingConfig,
};

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// Dataset directory could not be resolved.
    DatasetNotFound(LibError),

    /// Failed to load the airport network.
    NetworkLoad(LibError),

    /// Failed to build the route graph.
    GraphBuild(LibError),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatasetNotFound(e) => write!(f, "dataset not available: {}", e),
            Self::NetworkLoad(e) => write!(f, "failed to load airport network: {}", e),
            Self::GraphBuild(e) => write!(f, "failed to build route graph: {}", e),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DatasetNotFound(e) | Self::NetworkLoad(e) | Self::GraphBuild(e) => Some(e),
        }
    }
}

/// Shared application state for all axum handlers.
///
/// Cheaply cloneable; share it via axum's `State` extractor.
///
/// ```ignore
/// use axum::{Router, routing::get, extract::State};
/// use flightpath_service_shared::AppState;
///
/// async fn handler(State(state): State<AppState>) {
///     let network = state.network();
/// }
///
/// let state = AppState::load(None, RoutingConfig::default()).unwrap();
/// let app = Router::new()
///     .route("/airports/{code}", get(handler))
///     .with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    network: Network,
    graph: Graph,
    config: RoutingConfig,
}

impl AppState {
    /// Load the dataset and build the route graph once for the process.
    ///
    /// `data_dir` falls back to `FLIGHTPATH_DATA_DIR` and then the platform
    /// data directory.
    pub fn load(data_dir: Option<&Path>, config: RoutingConfig) -> Result<Self, AppStateError> {
        let dir = resolve_data_dir(data_dir).map_err(AppStateError::DatasetNotFound)?;

        tracing::info!(path = %dir.display(), "loading airport network");
        let network = load_network(&dir).map_err(AppStateError::NetworkLoad)?;
        let graph = build_network_graph(&network, &config.graph_options())
            .map_err(AppStateError::GraphBuild)?;
        tracing::info!(
            airports = network.locations.len(),
            nodes = graph.node_count(),
            "airport network loaded successfully"
        );

        Ok(Self::from_components(network, graph, config))
    }

    /// Create application state from pre-built components.
    pub fn from_components(network: Network, graph: Graph, config: RoutingConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                network,
                graph,
                config,
            }),
        }
    }

    pub fn network(&self) -> &Network {
        &self.inner.network
    }

    pub fn graph(&self) -> &Graph {
        &self.inner.graph
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.inner.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("airport_count", &self.inner.network.locations.len())
            .field("node_count", &self.inner.graph.node_count())
            .field("config", &self.inner.config)
            .finish()
    }
}
