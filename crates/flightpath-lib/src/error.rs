use std::path::PathBuf;

use thiserror::Error;

use crate::network::LocationId;

/// Convenient result alias for the flightpath library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Dataset could not be located at the resolved path.
    #[error("dataset not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the dataset location")]
    ProjectDirsUnavailable,

    /// Raised when a dataset row could not be interpreted.
    #[error("{file}:{line}: {message}")]
    DatasetParse {
        file: String,
        line: u64,
        message: String,
    },

    /// Raised when graph construction receives no locations at all.
    #[error("cannot build a route graph without locations")]
    EmptyNetwork,

    /// Raised when two locations share the same identifier.
    #[error("duplicate location id {id}")]
    DuplicateLocation { id: LocationId },

    /// Raised when a connection references a location that was not supplied.
    #[error("connection {source_id} -> {target_id} references unknown location {missing}")]
    UnknownConnectionEndpoint {
        source_id: LocationId,
        target_id: LocationId,
        missing: LocationId,
    },

    /// Raised when a connection carries a negative or non-finite distance.
    #[error("connection {source_id} -> {target_id} has invalid distance {distance}")]
    InvalidConnectionDistance {
        source_id: LocationId,
        target_id: LocationId,
        distance: f64,
    },

    /// Raised when a location carries an out-of-range coordinate.
    #[error("location {id} has invalid coordinate ({latitude}, {longitude})")]
    InvalidCoordinate {
        id: LocationId,
        latitude: f64,
        longitude: f64,
    },

    /// Raised when the ground-hop threshold is not a positive finite number.
    #[error("ground hop threshold must be a positive number of kilometres, got {value}")]
    InvalidGroundHopThreshold { value: f64 },

    /// Raised when a search endpoint is not a node of the graph.
    #[error("location {id} is not part of the route graph")]
    UnknownLocation { id: LocationId },

    /// Raised when a location code could not be found in the dataset.
    #[error("unknown airport code: {code}{}", format_suggestions(.suggestions))]
    UnknownLocationCode {
        code: String,
        suggestions: Vec<String>,
    },

    /// Raised when the start and goal of a search are the same location.
    #[error("start and goal must be different locations")]
    IdenticalEndpoints,

    /// Raised when search limits cannot produce a meaningful search.
    #[error("invalid search limits: {message}")]
    InvalidSearchLimits { message: String },

    /// Raised when a search expands more states than its budget allows.
    #[error("search budget exhausted after expanding {expanded} states")]
    SearchBudgetExhausted { expanded: usize },

    /// Raised when no route could be found between two locations.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: String, goal: String },

    /// Raised when an environment override cannot be parsed.
    #[error("invalid value {value:?} for {key}: {message}")]
    InvalidConfig {
        key: String,
        value: String,
        message: String,
    },

    /// Wrapper for CSV reader errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
