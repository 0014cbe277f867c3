//! Route planning on top of the search engine.
//!
//! This module provides:
//! - [`RouteAlgorithm`] - Supported search variants (A*, Dijkstra)
//! - [`RouteRequest`] - Route query expressed with airport codes
//! - [`RoutePlan`] - Planned route result
//! - [`plan_route`] - Main entry point for computing routes
//!
//! # Example
//!
//! ```no_run
//! use flightpath_lib::{build_network_graph, load_network, plan_route, RouteRequest, RoutingConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RoutingConfig::default();
//! let network = load_network(std::path::Path::new("data"))?;
//! let graph = build_network_graph(&network, &config.graph_options())?;
//! let plan = plan_route(&network, &graph, &config, &RouteRequest::new("TLL", "SFO"))?;
//! println!("{} km via {:?}", plan.distance, plan.step_codes(&network));
//! # Ok(())
//! # }
//! ```

mod planner;

pub use planner::{select_planner, AStarPlanner, DijkstraPlanner, RoutePlanner};

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::config::RoutingConfig;
use crate::error::{Error, Result};
use crate::graph::{EdgeKind, Graph};
use crate::network::{LocationId, Network};
use crate::path::{Leg, PathResult};

/// Number of "did you mean" suggestions attached to unknown codes.
const MAX_SUGGESTIONS: usize = 3;

/// Supported routing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RouteAlgorithm {
    /// A* search guided by great-circle distance.
    #[default]
    #[serde(rename = "a-star")]
    AStar,
    /// Uniform-cost search without a heuristic.
    Dijkstra,
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::AStar => "a-star",
            RouteAlgorithm::Dijkstra => "dijkstra",
        };
        f.write_str(value)
    }
}

/// High-level route request expressed with IATA or ICAO codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    pub start: String,
    pub goal: String,
    pub algorithm: RouteAlgorithm,
    /// Overrides the configured layover cap for this request.
    pub max_layovers: Option<u32>,
}

impl RouteRequest {
    pub fn new(start: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            goal: goal.into(),
            algorithm: RouteAlgorithm::default(),
            max_layovers: None,
        }
    }

    pub fn with_algorithm(mut self, algorithm: RouteAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_max_layovers(mut self, max_layovers: u32) -> Self {
        self.max_layovers = Some(max_layovers);
        self
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub algorithm: RouteAlgorithm,
    pub start: LocationId,
    pub goal: LocationId,
    pub steps: Vec<LocationId>,
    pub legs: Vec<Leg>,
    /// Total distance rounded to whole kilometres.
    pub distance: u64,
    pub exact_distance: f64,
}

impl RoutePlan {
    /// Number of legs in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Number of flight legs.
    pub fn flights(&self) -> usize {
        self.legs
            .iter()
            .filter(|leg| leg.kind == EdgeKind::Flight)
            .count()
    }

    /// Number of ground hops.
    pub fn ground_hops(&self) -> usize {
        self.legs.len() - self.flights()
    }

    /// Display codes for every airport on the route.
    pub fn step_codes(&self, network: &Network) -> Vec<String> {
        self.steps
            .iter()
            .map(|&id| network.display_code(id))
            .collect()
    }
}

/// Resolve an airport code to its identifier, suggesting close matches.
pub fn resolve_location(network: &Network, code: &str) -> Result<LocationId> {
    network.location_id_by_code(code).ok_or_else(|| {
        let suggestions = network.fuzzy_code_matches(code, MAX_SUGGESTIONS);
        Error::UnknownLocationCode {
            code: code.to_string(),
            suggestions,
        }
    })
}

/// Compute a route between two airport codes.
///
/// 1. Resolves codes to airport ids
/// 2. Rejects identical endpoints
/// 3. Runs the selected planner with the configured limits
/// 4. Maps an empty result to [`Error::RouteNotFound`]
pub fn plan_route(
    network: &Network,
    graph: &Graph,
    config: &RoutingConfig,
    request: &RouteRequest,
) -> Result<RoutePlan> {
    let start = resolve_location(network, &request.start)?;
    let goal = resolve_location(network, &request.goal)?;
    if start == goal {
        return Err(Error::IdenticalEndpoints);
    }

    let mut limits = config.search_limits();
    if let Some(max_layovers) = request.max_layovers {
        limits.max_layovers = max_layovers;
    }

    let planner = select_planner(request.algorithm);
    debug!(
        start = %request.start,
        goal = %request.goal,
        algorithm = %planner.algorithm(),
        max_layovers = limits.max_layovers,
        "planning route"
    );

    match planner.find_path(graph, start, goal, &limits)? {
        PathResult::Found(path) => Ok(RoutePlan {
            algorithm: planner.algorithm(),
            start,
            goal,
            steps: path.hops,
            legs: path.legs,
            distance: path.distance,
            exact_distance: path.exact_distance,
        }),
        PathResult::NotFound => Err(Error::RouteNotFound {
            start: network.display_code(start),
            goal: network.display_code(goal),
        }),
    }
}
