//! Layover-constrained shortest-path search.
//!
//! The search runs A* over composite states `(airport, flight legs used,
//! arrived via ground hop)`, so an arrival with fewer legs used, or one that
//! may still take a ground hop, is tracked apart from a cheaper arrival
//! without that headroom. Rules applied while expanding a state:
//!
//! - a state whose leg count reached the cap is not expanded,
//! - a flight may only be taken from a state with fewer than `cap - 1` legs
//!   unless it lands on the goal,
//! - a ground hop may not follow another ground hop,
//! - an airport already on the path to the current state is never revisited.
//!
//! Each state keeps only its cheapest parent chain, and the no-revisit rule is
//! checked against that chain. A pricier arrival at the same state is
//! dropped even when it is the only one that can continue through an airport
//! the cheaper chain already used, so a valid simple route can be reported as
//! [`PathResult::NotFound`]. Finding such routes exactly needs the visited
//! set in the state key, which is exponential.
//!
//! All search bookkeeping is local to one call; the graph is only read.

use std::cmp::{Ordering, Reverse};
use std::collections::{HashMap, HashSet};

use priority_queue::PriorityQueue;
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{EdgeKind, Graph};
use crate::network::LocationId;

/// Default cap on flight legs in one route.
pub const DEFAULT_MAX_LAYOVERS: u32 = 4;

/// Per-query limits for the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum number of flight legs in a route.
    pub max_layovers: u32,
    /// Maximum number of states to expand before giving up.
    pub max_expansions: Option<usize>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_layovers: DEFAULT_MAX_LAYOVERS,
            max_expansions: None,
        }
    }
}

impl SearchLimits {
    pub fn new(max_layovers: u32) -> Self {
        Self {
            max_layovers,
            max_expansions: None,
        }
    }

    pub fn with_max_expansions(mut self, budget: usize) -> Self {
        self.max_expansions = Some(budget);
        self
    }

    fn validate(&self) -> Result<()> {
        if self.max_layovers == 0 {
            return Err(Error::InvalidSearchLimits {
                message: "max_layovers must be at least 1".to_string(),
            });
        }
        if self.max_expansions == Some(0) {
            return Err(Error::InvalidSearchLimits {
                message: "max_expansions must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// One traversed edge of a found route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leg {
    pub from: LocationId,
    pub to: LocationId,
    pub kind: EdgeKind,
    pub distance: f64,
}

/// Successful search outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoundPath {
    /// Airports from start to goal, inclusive.
    pub hops: Vec<LocationId>,
    pub legs: Vec<Leg>,
    /// Total distance rounded to whole kilometres.
    pub distance: u64,
    /// Total distance at full precision.
    pub exact_distance: f64,
}

impl FoundPath {
    pub fn flight_count(&self) -> usize {
        self.legs
            .iter()
            .filter(|leg| leg.kind == EdgeKind::Flight)
            .count()
    }

    pub fn ground_hop_count(&self) -> usize {
        self.legs.len() - self.flight_count()
    }
}

/// Result of a single search.
#[derive(Debug, Clone, PartialEq)]
pub enum PathResult {
    NotFound,
    Found(FoundPath),
}

impl PathResult {
    pub fn is_found(&self) -> bool {
        matches!(self, PathResult::Found(_))
    }

    pub fn found(&self) -> Option<&FoundPath> {
        match self {
            PathResult::Found(path) => Some(path),
            PathResult::NotFound => None,
        }
    }

    pub fn into_found(self) -> Option<FoundPath> {
        match self {
            PathResult::Found(path) => Some(path),
            PathResult::NotFound => None,
        }
    }
}

/// Find the cheapest route from `start` to `goal` with a great-circle heuristic.
pub fn find_path(
    graph: &Graph,
    start: LocationId,
    goal: LocationId,
    limits: &SearchLimits,
) -> Result<PathResult> {
    let goal_coordinate = graph
        .coordinate(goal)
        .ok_or(Error::UnknownLocation { id: goal })?;
    search(graph, start, goal, limits, |node| {
        graph
            .coordinate(node)
            .map(|coordinate| coordinate.distance_km(&goal_coordinate))
            .unwrap_or(0.0)
    })
}

/// Same search as [`find_path`] with a zero heuristic (uniform-cost search).
pub fn find_path_dijkstra(
    graph: &Graph,
    start: LocationId,
    goal: LocationId,
    limits: &SearchLimits,
) -> Result<PathResult> {
    search(graph, start, goal, limits, |_| 0.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct StateKey {
    node: LocationId,
    legs: u32,
    via_ground: bool,
}

#[derive(Debug, Clone, Copy)]
struct ParentLink {
    state: StateKey,
    kind: EdgeKind,
    distance: f64,
}

/// Max-heap priority that pops the lowest estimate first, oldest on ties.
type Priority = Reverse<(FloatOrd, u64)>;

fn search<H>(
    graph: &Graph,
    start: LocationId,
    goal: LocationId,
    limits: &SearchLimits,
    heuristic: H,
) -> Result<PathResult>
where
    H: Fn(LocationId) -> f64,
{
    for id in [start, goal] {
        if !graph.contains(id) {
            return Err(Error::UnknownLocation { id });
        }
    }
    if start == goal {
        return Err(Error::IdenticalEndpoints);
    }
    limits.validate()?;

    // Flights are only allowed from states with at most this many legs,
    // except for flights that land on the goal.
    let open_flight_limit = i64::from(limits.max_layovers) - 2;

    let mut frontier: PriorityQueue<StateKey, Priority> = PriorityQueue::new();
    let mut costs: HashMap<StateKey, f64> = HashMap::new();
    let mut parents: HashMap<StateKey, ParentLink> = HashMap::new();
    let mut visited: HashSet<StateKey> = HashSet::new();
    let mut sequence: u64 = 0;
    let mut expanded: usize = 0;

    let origin = StateKey {
        node: start,
        legs: 0,
        via_ground: false,
    };
    costs.insert(origin, 0.0);
    frontier.push(origin, Reverse((FloatOrd(heuristic(start)), sequence)));

    while let Some((state, _)) = frontier.pop() {
        let current_cost = costs.get(&state).copied().unwrap_or(f64::INFINITY);

        if state.node == goal {
            debug!(start, goal, expanded, distance = current_cost, "route found");
            return Ok(PathResult::Found(reconstruct_path(
                &parents,
                state,
                current_cost,
            )));
        }

        if state.legs >= limits.max_layovers {
            continue;
        }

        if let Some(budget) = limits.max_expansions {
            if expanded >= budget {
                debug!(start, goal, expanded, "search budget exhausted");
                return Err(Error::SearchBudgetExhausted { expanded });
            }
        }
        expanded += 1;
        visited.insert(state);

        let on_path = path_nodes(&parents, state);

        for edge in graph.neighbours(state.node) {
            let is_flight = edge.kind == EdgeKind::Flight;

            if is_flight && i64::from(state.legs) > open_flight_limit && edge.target != goal {
                continue;
            }
            if state.via_ground && !is_flight {
                continue;
            }
            if on_path.contains(&edge.target) {
                continue;
            }

            let next = StateKey {
                node: edge.target,
                legs: state.legs + u32::from(is_flight),
                via_ground: !is_flight,
            };
            if visited.contains(&next) {
                continue;
            }

            let tentative = current_cost + edge.distance;
            if tentative < costs.get(&next).copied().unwrap_or(f64::INFINITY) {
                costs.insert(next, tentative);
                parents.insert(
                    next,
                    ParentLink {
                        state,
                        kind: edge.kind,
                        distance: edge.distance,
                    },
                );
                sequence += 1;
                let estimate = tentative + heuristic(edge.target);
                // Re-pushing an existing state updates its priority in place.
                frontier.push(next, Reverse((FloatOrd(estimate), sequence)));
            }
        }
    }

    debug!(start, goal, expanded, "no route within layover cap");
    Ok(PathResult::NotFound)
}

/// Airports on the parent chain of `state`, including its own node.
fn path_nodes(parents: &HashMap<StateKey, ParentLink>, state: StateKey) -> Vec<LocationId> {
    let mut nodes = vec![state.node];
    let mut current = state;
    while let Some(link) = parents.get(&current) {
        nodes.push(link.state.node);
        current = link.state;
    }
    nodes
}

fn reconstruct_path(
    parents: &HashMap<StateKey, ParentLink>,
    goal: StateKey,
    total_distance: f64,
) -> FoundPath {
    let mut legs = Vec::new();
    let mut current = goal;
    while let Some(link) = parents.get(&current) {
        legs.push(Leg {
            from: link.state.node,
            to: current.node,
            kind: link.kind,
            distance: link.distance,
        });
        current = link.state;
    }
    legs.reverse();

    let mut hops = Vec::with_capacity(legs.len() + 1);
    hops.push(current.node);
    hops.extend(legs.iter().map(|leg| leg.to));

    FoundPath {
        hops,
        legs,
        distance: total_distance.round() as u64,
        exact_distance: total_distance,
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}
