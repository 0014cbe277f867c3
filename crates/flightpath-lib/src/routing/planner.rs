//! Route search strategies.
//!
//! The `RoutePlanner` trait lets `plan_route` stay independent of the search
//! variant. Both planners share the same constrained search and differ only in
//! the heuristic.

use crate::error::Result;
use crate::graph::Graph;
use crate::network::LocationId;
use crate::path::{find_path, find_path_dijkstra, PathResult, SearchLimits};

use super::RouteAlgorithm;

/// Trait for route search strategies.
pub trait RoutePlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> RouteAlgorithm;

    /// Run the search on the given graph.
    fn find_path(
        &self,
        graph: &Graph,
        start: LocationId,
        goal: LocationId,
        limits: &SearchLimits,
    ) -> Result<PathResult>;
}

/// Uniform-cost planner (zero heuristic).
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraPlanner;

impl RoutePlanner for DijkstraPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Dijkstra
    }

    fn find_path(
        &self,
        graph: &Graph,
        start: LocationId,
        goal: LocationId,
        limits: &SearchLimits,
    ) -> Result<PathResult> {
        find_path_dijkstra(graph, start, goal, limits)
    }
}

/// A* planner guided by great-circle distance to the goal.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStarPlanner;

impl RoutePlanner for AStarPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::AStar
    }

    fn find_path(
        &self,
        graph: &Graph,
        start: LocationId,
        goal: LocationId,
        limits: &SearchLimits,
    ) -> Result<PathResult> {
        find_path(graph, start, goal, limits)
    }
}

/// Select the planner for an algorithm.
pub fn select_planner(algorithm: RouteAlgorithm) -> Box<dyn RoutePlanner> {
    match algorithm {
        RouteAlgorithm::AStar => Box::new(AStarPlanner),
        RouteAlgorithm::Dijkstra => Box::new(DijkstraPlanner),
    }
}
