//! Flightpath library entry points.
//!
//! This crate exposes helpers to locate an OpenFlights-style dataset, load the
//! airport network into memory, build the route graph with flight and ground
//! edges, and run the layover-constrained route search. Higher-level consumers
//! (CLI, HTTP service) should only depend on the functions exported here
//! instead of reimplementing behavior.

pub mod config;
pub mod dataset;
pub mod error;
pub mod geo;
pub mod graph;
pub mod network;
pub mod output;
pub mod path;
pub mod routing;
pub mod spatial;

pub use config::RoutingConfig;
pub use dataset::{load_network, resolve_data_dir};
pub use error::{Error, Result};
pub use geo::{great_circle_distance, Coordinate, EARTH_RADIUS_KM};
pub use graph::{build_graph, build_network_graph, Edge, EdgeKind, Graph, GraphBuildOptions};
pub use network::{Connection, Location, LocationId, Network};
pub use output::{RouteStep, RouteSummary};
pub use path::{find_path, find_path_dijkstra, FoundPath, Leg, PathResult, SearchLimits};
pub use routing::{plan_route, resolve_location, RouteAlgorithm, RoutePlan, RouteRequest};
pub use spatial::ProximityIndex;
