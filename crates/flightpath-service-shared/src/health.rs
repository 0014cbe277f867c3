//! Health check handlers.
//!
//! `/health` answers with a plain `OK`; `/health/live` and `/health/ready`
//! return JSON status for liveness and readiness probes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use flightpath_lib::EdgeKind;

use crate::AppState;

/// Health status response for liveness and readiness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Status indicator: "ok" or "not_ready: <reason>".
    pub status: String,

    pub service: String,

    pub version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub airports_loaded: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight_edges: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ground_edges: Option<usize>,
}

impl HealthStatus {
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            airports_loaded: None,
            flight_edges: None,
            ground_edges: None,
        }
    }

    pub fn ready(
        service: &str,
        version: &str,
        airports: usize,
        flight_edges: usize,
        ground_edges: usize,
    ) -> Self {
        Self {
            airports_loaded: Some(airports),
            flight_edges: Some(flight_edges),
            ground_edges: Some(ground_edges),
            ..Self::alive(service, version)
        }
    }

    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {}", reason),
            ..Self::alive(service, version)
        }
    }
}

/// Plain-text health check.
///
/// ```text
/// GET /health
/// OK
/// ```
pub async fn health() -> &'static str {
    "OK"
}

/// Liveness probe handler; does not touch loaded data.
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler.
///
/// ```text
/// GET /health/ready
/// {"status":"ok","service":"flightpath-service-shared","version":"0.1.0","airports_loaded":29,"flight_edges":98,"ground_edges":12}
/// ```
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    let airports = state.network().locations.len();
    if airports == 0 {
        let status = HealthStatus::not_ready(service, version, "no airports loaded");
        return (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response();
    }

    let graph = state.graph();
    let status = HealthStatus::ready(
        service,
        version,
        airports,
        graph.edge_count(EdgeKind::Flight),
        graph.edge_count(EdgeKind::Ground),
    );
    (StatusCode::OK, Json(status)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alive_has_no_counts() {
        let status = HealthStatus::alive("test-service", "1.0.0");
        assert_eq!(status.status, "ok");
        assert_eq!(status.service, "test-service");
        assert!(status.airports_loaded.is_none());

        let json = serde_json::to_string(&status).unwrap();
        assert!(!json.contains("airports_loaded"));
    }

    #[test]
    fn ready_reports_counts() {
        let status = HealthStatus::ready("test-service", "1.0.0", 29, 98, 12);
        assert_eq!(status.status, "ok");
        assert_eq!(status.airports_loaded, Some(29));
        assert_eq!(status.ground_edges, Some(12));
    }

    #[test]
    fn not_ready_carries_reason() {
        let status = HealthStatus::not_ready("test-service", "1.0.0", "no data");
        assert_eq!(status.status, "not_ready: no data");
    }

    #[test]
    fn plain_health_says_ok() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        assert_eq!(rt.block_on(health()), "OK");
    }
}
