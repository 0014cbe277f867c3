//! Query types and validation for HTTP endpoints.

use serde::{Deserialize, Serialize};

use crate::ProblemDetails;

/// Validation trait for request types.
///
/// Returns a boxed `ProblemDetails` to avoid large `Result::Err` variants.
pub trait Validate {
    /// Validate the request; `request_id` populates the problem `instance`.
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

/// Query parameters accepted by `GET /routes/{source}/{destination}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteQuery {
    /// Overrides the configured cap on flight legs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_layovers: Option<u32>,

    #[serde(default)]
    pub algorithm: RouteAlgorithm,
}

/// Supported routing algorithms.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RouteAlgorithm {
    /// A* search with great-circle heuristic (default).
    #[default]
    AStar,
    /// Uniform-cost search.
    Dijkstra,
}

impl From<RouteAlgorithm> for flightpath_lib::RouteAlgorithm {
    fn from(value: RouteAlgorithm) -> Self {
        match value {
            RouteAlgorithm::AStar => flightpath_lib::RouteAlgorithm::AStar,
            RouteAlgorithm::Dijkstra => flightpath_lib::RouteAlgorithm::Dijkstra,
        }
    }
}

impl Validate for RouteQuery {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        if self.max_layovers == Some(0) {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'max_layovers' parameter must be at least 1",
                request_id,
            )));
        }
        Ok(())
    }
}

/// Check that a path segment looks like an IATA/ICAO code.
pub fn validate_code(field: &str, code: &str, request_id: &str) -> Result<(), Box<ProblemDetails>> {
    let code = code.trim();
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(Box::new(ProblemDetails::bad_request(
            format!("The '{field}' airport code must be a non-empty alphanumeric code"),
            request_id,
        )));
    }
    Ok(())
}
