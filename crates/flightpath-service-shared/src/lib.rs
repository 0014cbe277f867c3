//! Shared infrastructure for the flightpath HTTP service.
//!
//! This crate provides the HTTP glue around `flightpath-lib`:
//!
//! - [`AppState`]: Pre-loaded airport network and route graph
//! - [`health`]: Health check handlers for liveness/readiness probes
//! - [`ProblemDetails`]: RFC 9457 Problem Details for consistent error responses
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: Structured JSON logging setup
//! - [`middleware`]: Request tracking middleware
//! - Query types with validation for each endpoint
//!
//! # Architecture
//!
//! Handlers stay thin; all routing logic resides in `flightpath-lib`:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Extract path and query parameters                        │
//! │  - Validate parameters                                      │
//! │  - Call flightpath-lib APIs                                 │
//! │  - Format response                                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides a state loaded from the fixture dataset.
//! Enable the `test-utils` feature to access it from dependent crates.

mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use health::{health, health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_airport_lookup, record_route_calculated,
    record_route_failed, record_route_legs, MetricsConfig, MetricsError,
};
pub use middleware::{extract_or_generate_request_id, track_requests, RequestId};
pub use problem::{
    failure_reason, from_lib_error, ProblemDetails, ProblemKind, PROBLEM_INTERNAL_ERROR,
    PROBLEM_INVALID_REQUEST, PROBLEM_ROUTE_NOT_FOUND, PROBLEM_SERVICE_UNAVAILABLE,
    PROBLEM_UNKNOWN_AIRPORT,
};
pub use request::{validate_code, RouteAlgorithm, RouteQuery, Validate};
pub use state::{AppState, AppStateError};
