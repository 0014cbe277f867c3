//! Route command handler.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use clap::{Args, ValueEnum};

use flightpath_lib::{
    build_network_graph, plan_route, Error as RouteError, RouteAlgorithm, RouteRequest,
    RouteSummary, RoutingConfig,
};

use super::load_dataset;
use crate::output::{render_route, OutputFormat};

/// Search variant selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AlgorithmArg {
    #[default]
    AStar,
    Dijkstra,
}

impl From<AlgorithmArg> for RouteAlgorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::AStar => RouteAlgorithm::AStar,
            AlgorithmArg::Dijkstra => RouteAlgorithm::Dijkstra,
        }
    }
}

/// Arguments for the route command.
#[derive(Debug, Clone, Args)]
pub struct RouteArgs {
    /// Origin airport code (IATA or ICAO).
    #[arg(long = "from")]
    pub from: String,
    /// Destination airport code (IATA or ICAO).
    #[arg(long = "to")]
    pub to: String,
    /// Maximum number of flight legs (overrides FLIGHTPATH_MAX_LAYOVERS).
    #[arg(long)]
    pub max_layovers: Option<u32>,
    /// Ground-hop threshold in km (overrides FLIGHTPATH_GROUND_HOP_KM).
    #[arg(long = "ground-hop-km")]
    pub ground_hop_km: Option<f64>,
    /// Search algorithm.
    #[arg(long, value_enum, default_value_t = AlgorithmArg::AStar)]
    pub algorithm: AlgorithmArg,
}

impl RouteArgs {
    /// Convert CLI args to a library RouteRequest.
    pub fn to_request(&self) -> RouteRequest {
        let request = RouteRequest::new(&self.from, &self.to).with_algorithm(self.algorithm.into());
        match self.max_layovers {
            Some(max_layovers) => request.with_max_layovers(max_layovers),
            None => request,
        }
    }
}

/// Compute and print a route between two airports.
pub fn handle_route_command(
    data_dir: Option<&Path>,
    format: OutputFormat,
    args: &RouteArgs,
) -> Result<()> {
    let mut config = RoutingConfig::from_env().context("invalid routing configuration")?;
    if let Some(threshold_km) = args.ground_hop_km {
        config = config.with_ground_hop_threshold_km(threshold_km);
    }

    let network = load_dataset(data_dir)?;
    let graph = build_network_graph(&network, &config.graph_options())
        .context("failed to build the route graph")?;

    let plan = plan_route(&network, &graph, &config, &args.to_request())
        .map_err(friendly_route_error)?;
    let summary = RouteSummary::from_plan(&network, &plan);
    render_route(&summary, format).context("failed to write output")
}

fn friendly_route_error(err: RouteError) -> anyhow::Error {
    match err {
        RouteError::RouteNotFound { .. } => anyhow!(
            "{err}. Try raising --max-layovers or widening --ground-hop-km."
        ),
        RouteError::SearchBudgetExhausted { .. } => anyhow!(
            "{err}. Raise FLIGHTPATH_SEARCH_BUDGET or set it to 'none'."
        ),
        other => other.into(),
    }
}
