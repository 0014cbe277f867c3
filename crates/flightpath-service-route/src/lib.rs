//! Route planning HTTP service.
//!
//! # Endpoints
//!
//! - `GET /routes/{source}/{destination}` - Shortest route between two airports
//! - `GET /airports/{code}` - Airport details
//! - `GET /health` - Plain-text health check
//! - `GET /health/live`, `GET /health/ready` - Liveness and readiness probes
//! - `GET /metrics` - Prometheus metrics
//!
//! Route queries accept `max_layovers` (cap on flights, at least 1) and
//! `algorithm` (`a-star` or `dijkstra`).

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use flightpath_lib::{
    plan_route, resolve_location, RouteRequest as LibRequest, RouteSummary,
};
use flightpath_service_shared::{
    failure_reason, from_lib_error, health, health_live, health_ready, metrics_handler,
    record_airport_lookup, record_route_calculated, record_route_failed, record_route_legs,
    track_requests, validate_code, AppState, ProblemDetails, RequestId, RouteQuery, Validate,
};

/// Route response returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResponse {
    /// Source code as sent in the request path.
    pub source: String,
    /// Destination code as sent in the request path.
    pub destination: String,
    /// Total distance in whole kilometres.
    pub distance: u64,
    /// Airport codes from source to destination.
    pub hops: Vec<String>,
    pub flights: usize,
    pub ground_hops: usize,
}

impl RouteResponse {
    pub fn new(source: &str, destination: &str, summary: RouteSummary) -> Self {
        Self {
            source: source.to_string(),
            destination: destination.to_string(),
            distance: summary.distance,
            hops: summary.hops,
            flights: summary.flights,
            ground_hops: summary.ground_hops,
        }
    }
}

/// Build the service router around a loaded state.
pub fn app(state: AppState, metrics_path: &str) -> Router {
    Router::new()
        .route("/routes/{source}/{destination}", get(route_handler))
        .route("/airports/{code}", get(airport_handler))
        .route("/health", get(health))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .route(metrics_path, get(metrics_handler))
        .layer(middleware::from_fn(track_requests))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handle `GET /routes/{source}/{destination}`.
async fn route_handler(
    State(state): State<AppState>,
    request_id: RequestId,
    Path((source, destination)): Path<(String, String)>,
    query: Result<Query<RouteQuery>, QueryRejection>,
) -> Response {
    let request_id = request_id.as_str();

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            record_route_failed("validation_error");
            return ProblemDetails::bad_request(rejection.body_text(), request_id).into_response();
        }
    };

    let validation = validate_code("source", &source, request_id)
        .and_then(|_| validate_code("destination", &destination, request_id))
        .and_then(|_| query.validate(request_id));
    if let Err(problem) = validation {
        record_route_failed("validation_error");
        return (*problem).into_response();
    }

    info!(
        source = %source,
        destination = %destination,
        max_layovers = ?query.max_layovers,
        algorithm = ?query.algorithm,
        "handling route request"
    );

    let mut request = LibRequest::new(source.trim(), destination.trim())
        .with_algorithm(query.algorithm.into());
    if let Some(max_layovers) = query.max_layovers {
        request = request.with_max_layovers(max_layovers);
    }

    let network = state.network();
    let plan = match plan_route(network, state.graph(), state.config(), &request) {
        Ok(plan) => plan,
        Err(error) => {
            warn!(error = %error, "route planning failed");
            record_route_failed(failure_reason(&error));
            return from_lib_error(&error, request_id).into_response();
        }
    };

    let summary = RouteSummary::from_plan(network, &plan);
    record_route_calculated(&plan.algorithm.to_string());
    record_route_legs(summary.flights, summary.ground_hops);

    info!(
        distance = summary.distance,
        flights = summary.flights,
        ground_hops = summary.ground_hops,
        "route computed"
    );

    Json(RouteResponse::new(source.trim(), destination.trim(), summary)).into_response()
}

/// Handle `GET /airports/{code}`.
async fn airport_handler(
    State(state): State<AppState>,
    request_id: RequestId,
    Path(code): Path<String>,
) -> Response {
    let request_id = request_id.as_str();
    if let Err(problem) = validate_code("code", &code, request_id) {
        return (*problem).into_response();
    }

    let network = state.network();
    let location = resolve_location(network, code.trim())
        .map(|id| network.location(id).cloned());
    match location {
        Ok(Some(location)) => {
            record_airport_lookup(true);
            Json(location).into_response()
        }
        Ok(None) => {
            record_airport_lookup(false);
            ProblemDetails::unknown_airport(code.trim(), &[], request_id).into_response()
        }
        Err(error) => {
            record_airport_lookup(false);
            from_lib_error(&error, request_id).into_response()
        }
    }
}
