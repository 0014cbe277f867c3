use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::geo::Coordinate;
use crate::network::{Connection, Location, LocationId, Network};
use crate::spatial::ProximityIndex;

/// Default maximum surface distance for two airports to be linked by a ground hop.
pub const DEFAULT_GROUND_HOP_THRESHOLD_KM: f64 = 100.0;

/// Classification for the edge used in the routing graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Scheduled direct connection; counts against the layover cap.
    Flight,
    /// Synthetic surface transfer between nearby airports.
    Ground,
}

/// Edge within the routing graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub target: LocationId,
    pub kind: EdgeKind,
    pub distance: f64,
}

/// Options applied while building a routing graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphBuildOptions {
    /// Airports strictly closer than this many kilometres get ground-hop edges.
    pub ground_hop_threshold_km: f64,
}

impl Default for GraphBuildOptions {
    fn default() -> Self {
        Self {
            ground_hop_threshold_km: DEFAULT_GROUND_HOP_THRESHOLD_KM,
        }
    }
}

/// Immutable routing graph shared by every query.
///
/// Each ordered pair of airports carries at most one flight edge and at most
/// one ground edge. Cloning is cheap; the tables live behind `Arc`.
#[derive(Debug, Clone)]
pub struct Graph {
    adjacency: Arc<HashMap<LocationId, Vec<Edge>>>,
    coordinates: Arc<HashMap<LocationId, Coordinate>>,
    ground_hop_threshold_km: f64,
}

impl Graph {
    /// Return the outgoing edges for a given airport.
    pub fn neighbours(&self, location: LocationId) -> &[Edge] {
        self.adjacency
            .get(&location)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether the airport is a node of the graph.
    pub fn contains(&self, location: LocationId) -> bool {
        self.coordinates.contains_key(&location)
    }

    pub fn coordinate(&self, location: LocationId) -> Option<Coordinate> {
        self.coordinates.get(&location).copied()
    }

    pub fn node_count(&self) -> usize {
        self.coordinates.len()
    }

    /// Node identifiers in ascending order.
    pub fn nodes(&self) -> Vec<LocationId> {
        let mut nodes: Vec<LocationId> = self.coordinates.keys().copied().collect();
        nodes.sort_unstable();
        nodes
    }

    pub fn edge_count(&self, kind: EdgeKind) -> usize {
        self.adjacency
            .values()
            .flat_map(|edges| edges.iter())
            .filter(|edge| edge.kind == kind)
            .count()
    }

    /// Edge of the given kind between two airports, if present.
    pub fn edge(&self, from: LocationId, to: LocationId, kind: EdgeKind) -> Option<&Edge> {
        self.neighbours(from)
            .iter()
            .find(|edge| edge.target == to && edge.kind == kind)
    }

    /// Threshold the ground-hop edges were generated with.
    pub fn ground_hop_threshold_km(&self) -> f64 {
        self.ground_hop_threshold_km
    }
}

/// Build the routing graph for a loaded network.
pub fn build_network_graph(network: &Network, options: &GraphBuildOptions) -> Result<Graph> {
    build_graph(&network.sorted_locations(), &network.connections, options)
}

/// Build the routing graph from airports and direct connections.
///
/// One node is inserted per airport and one flight edge per connection
/// (repeated connections keep the shorter distance). Every ordered pair of
/// distinct airports closer than the threshold additionally receives a
/// ground edge weighted by the great-circle distance. Flight and ground
/// edges between the same pair coexist.
pub fn build_graph(
    locations: &[Location],
    connections: &[Connection],
    options: &GraphBuildOptions,
) -> Result<Graph> {
    let threshold = options.ground_hop_threshold_km;
    if !threshold.is_finite() || threshold <= 0.0 {
        return Err(Error::InvalidGroundHopThreshold { value: threshold });
    }
    if locations.is_empty() {
        return Err(Error::EmptyNetwork);
    }

    let mut coordinates: HashMap<LocationId, Coordinate> = HashMap::with_capacity(locations.len());
    let mut adjacency: HashMap<LocationId, Vec<Edge>> = HashMap::with_capacity(locations.len());
    for location in locations {
        if !location.coordinate.is_valid() {
            return Err(Error::InvalidCoordinate {
                id: location.id,
                latitude: location.coordinate.latitude,
                longitude: location.coordinate.longitude,
            });
        }
        if coordinates
            .insert(location.id, location.coordinate)
            .is_some()
        {
            return Err(Error::DuplicateLocation { id: location.id });
        }
        adjacency.insert(location.id, Vec::new());
    }

    for connection in connections {
        validate_connection(connection, &coordinates)?;
        if connection.source == connection.destination {
            debug!(location = connection.source, "ignoring self-loop connection");
            continue;
        }
        insert_edge(
            &mut adjacency,
            connection.source,
            Edge {
                target: connection.destination,
                kind: EdgeKind::Flight,
                distance: connection.distance,
            },
        );
    }

    let index = ProximityIndex::build(locations.iter().map(|l| (l.id, &l.coordinate)));
    for (a, b, distance) in index.pairs_within(threshold) {
        for (from, to) in [(a, b), (b, a)] {
            insert_edge(
                &mut adjacency,
                from,
                Edge {
                    target: to,
                    kind: EdgeKind::Ground,
                    distance,
                },
            );
        }
    }

    for edges in adjacency.values_mut() {
        edges.sort_by(|a, b| {
            compare_distance(a.distance, b.distance)
                .then_with(|| a.kind.cmp(&b.kind))
                .then_with(|| a.target.cmp(&b.target))
        });
    }

    let graph = Graph {
        adjacency: Arc::new(adjacency),
        coordinates: Arc::new(coordinates),
        ground_hop_threshold_km: threshold,
    };

    info!(
        nodes = graph.node_count(),
        flight_edges = graph.edge_count(EdgeKind::Flight),
        ground_edges = graph.edge_count(EdgeKind::Ground),
        ground_hop_threshold_km = threshold,
        "built route graph"
    );

    Ok(graph)
}

fn validate_connection(
    connection: &Connection,
    coordinates: &HashMap<LocationId, Coordinate>,
) -> Result<()> {
    for endpoint in [connection.source, connection.destination] {
        if !coordinates.contains_key(&endpoint) {
            return Err(Error::UnknownConnectionEndpoint {
                source_id: connection.source,
                target_id: connection.destination,
                missing: endpoint,
            });
        }
    }
    if !connection.distance.is_finite() || connection.distance < 0.0 {
        return Err(Error::InvalidConnectionDistance {
            source_id: connection.source,
            target_id: connection.destination,
            distance: connection.distance,
        });
    }
    Ok(())
}

fn insert_edge(adjacency: &mut HashMap<LocationId, Vec<Edge>>, from: LocationId, edge: Edge) {
    let entry = adjacency.entry(from).or_default();
    if let Some(existing) = entry
        .iter_mut()
        .find(|existing| existing.target == edge.target && existing.kind == edge.kind)
    {
        if edge.distance < existing.distance {
            *existing = edge;
        }
        return;
    }
    entry.push(edge);
}

fn compare_distance(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}
