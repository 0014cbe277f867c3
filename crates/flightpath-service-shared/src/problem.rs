//! Error bodies in the `application/problem+json` format (RFC 9457).
//!
//! Every failure the service reports is one of the [`ProblemKind`]s below;
//! the kind fixes the `type`, `title` and status, the occurrence adds
//! `detail` and the request id as `instance`.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use flightpath_lib::Error as LibError;

pub const PROBLEM_UNKNOWN_AIRPORT: &str = "/problems/unknown-airport";
pub const PROBLEM_ROUTE_NOT_FOUND: &str = "/problems/route-not-found";
pub const PROBLEM_INVALID_REQUEST: &str = "/problems/invalid-request";
pub const PROBLEM_INTERNAL_ERROR: &str = "/problems/internal-error";
/// Search budget exhausted or dataset missing.
pub const PROBLEM_SERVICE_UNAVAILABLE: &str = "/problems/service-unavailable";

const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

/// Categories of failure reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemKind {
    InvalidRequest,
    UnknownAirport,
    RouteNotFound,
    ServiceUnavailable,
    Internal,
}

impl ProblemKind {
    pub fn type_uri(self) -> &'static str {
        match self {
            ProblemKind::InvalidRequest => PROBLEM_INVALID_REQUEST,
            ProblemKind::UnknownAirport => PROBLEM_UNKNOWN_AIRPORT,
            ProblemKind::RouteNotFound => PROBLEM_ROUTE_NOT_FOUND,
            ProblemKind::ServiceUnavailable => PROBLEM_SERVICE_UNAVAILABLE,
            ProblemKind::Internal => PROBLEM_INTERNAL_ERROR,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ProblemKind::InvalidRequest => "Invalid Request",
            ProblemKind::UnknownAirport => "Unknown Airport",
            ProblemKind::RouteNotFound => "Route Not Found",
            ProblemKind::ServiceUnavailable => "Service Unavailable",
            ProblemKind::Internal => "Internal Error",
        }
    }

    pub fn status(self) -> StatusCode {
        match self {
            ProblemKind::InvalidRequest => StatusCode::BAD_REQUEST,
            ProblemKind::UnknownAirport | ProblemKind::RouteNotFound => StatusCode::NOT_FOUND,
            ProblemKind::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ProblemKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Problem body sent with every non-2xx route or airport response.
///
/// ```
/// use flightpath_service_shared::{ProblemDetails, ProblemKind};
///
/// let problem = ProblemDetails::of(ProblemKind::RouteNotFound, "TLL to LYR", "req-1");
/// assert_eq!(problem.status, 404);
/// assert_eq!(problem.instance.as_deref(), Some("req-1"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_uri: String,
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Request id of the failed request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl ProblemDetails {
    pub fn of(kind: ProblemKind, detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self {
            type_uri: kind.type_uri().to_string(),
            title: kind.title().to_string(),
            status: kind.status().as_u16(),
            detail: Some(detail.into()),
            instance: Some(request_id.into()),
        }
    }

    pub fn bad_request(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::of(ProblemKind::InvalidRequest, detail, request_id)
    }

    /// Unknown airport code, listing close matches when there are any.
    pub fn unknown_airport(
        code: &str,
        suggestions: &[String],
        request_id: impl Into<String>,
    ) -> Self {
        let mut detail = format!("Airport '{code}' not found");
        if !suggestions.is_empty() {
            detail.push_str(&format!(". Did you mean: {}?", suggestions.join(", ")));
        }
        Self::of(ProblemKind::UnknownAirport, detail, request_id)
    }

    pub fn route_not_found(start: &str, goal: &str, request_id: impl Into<String>) -> Self {
        Self::of(
            ProblemKind::RouteNotFound,
            format!("No route exists from '{start}' to '{goal}' within the layover limit"),
            request_id,
        )
    }

    pub fn internal_error(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::of(ProblemKind::Internal, detail, request_id)
    }

    pub fn service_unavailable(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::of(ProblemKind::ServiceUnavailable, detail, request_id)
    }
}

impl std::fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{} ({}): {}", self.title, self.status, detail),
            None => write!(f, "{} ({})", self.title, self.status),
        }
    }
}

impl std::error::Error for ProblemDetails {}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, Json(self)).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(PROBLEM_CONTENT_TYPE),
        );
        response
    }
}

/// Problem for a failed library call on behalf of request `request_id`.
pub fn from_lib_error(error: &LibError, request_id: &str) -> ProblemDetails {
    match error {
        LibError::UnknownLocationCode { code, suggestions } => {
            ProblemDetails::unknown_airport(code, suggestions, request_id)
        }
        LibError::RouteNotFound { start, goal } => {
            ProblemDetails::route_not_found(start, goal, request_id)
        }
        LibError::IdenticalEndpoints | LibError::InvalidSearchLimits { .. } => {
            ProblemDetails::bad_request(error.to_string(), request_id)
        }
        LibError::SearchBudgetExhausted { .. } => ProblemDetails::service_unavailable(
            format!("{error}; try again with fewer layovers"),
            request_id,
        ),
        LibError::DatasetNotFound { path } => ProblemDetails::service_unavailable(
            format!("no airport dataset at {}", path.display()),
            request_id,
        ),
        _ => ProblemDetails::internal_error(error.to_string(), request_id),
    }
}

/// Metric label describing why a route request failed.
pub fn failure_reason(error: &LibError) -> &'static str {
    match error {
        LibError::UnknownLocationCode { .. } => "unknown_airport",
        LibError::RouteNotFound { .. } => "no_path",
        LibError::IdenticalEndpoints | LibError::InvalidSearchLimits { .. } => "validation_error",
        LibError::SearchBudgetExhausted { .. } => "budget_exhausted",
        _ => "internal_error",
    }
}
