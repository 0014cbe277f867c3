//! Prometheus metrics for the flightpath service.
//!
//! - [`MetricsConfig`]: Configuration for the metrics system
//! - [`init_metrics`]: Install the Prometheus recorder
//! - [`metrics_handler`]: Axum handler for the `/metrics` endpoint
//! - Business metric helpers for route and airport lookups
//!
//! # Example
//!
//! ```no_run
//! use flightpath_service_shared::metrics::{init_metrics, metrics_handler, MetricsConfig};
//! use axum::{routing::get, Router};
//!
//! let config = MetricsConfig::default();
//! init_metrics(&config).expect("failed to initialize metrics");
//!
//! let app: Router = Router::new().route("/metrics", get(metrics_handler));
//! ```

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

pub const METRICS_ENABLED_ENV: &str = "METRICS_ENABLED";
pub const METRICS_PATH_ENV: &str = "METRICS_PATH";

static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Configuration for the metrics system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub enabled: bool,
    /// Path for the metrics endpoint (e.g., "/metrics").
    pub path: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl MetricsConfig {
    /// Create configuration from environment variables.
    ///
    /// - `METRICS_ENABLED`: "true" or "false" (default: true)
    /// - `METRICS_PATH`: Path for metrics endpoint (default: "/metrics")
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let enabled = lookup(METRICS_ENABLED_ENV)
            .map(|v| !v.eq_ignore_ascii_case("false"))
            .unwrap_or(true);
        let path = lookup(METRICS_PATH_ENV)
            .filter(|p| p.starts_with('/'))
            .unwrap_or_else(|| "/metrics".to_string());

        Self { enabled, path }
    }
}

/// Install the Prometheus metrics recorder.
///
/// Must be called once at startup before any metrics are recorded.
///
/// # Errors
///
/// Fails when metrics are disabled, when a recorder is already installed,
/// or when the Prometheus builder fails.
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }
    if PROMETHEUS_HANDLE.get().is_some() {
        return Err(MetricsError::AlreadyInitialized);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)
}

/// Returns `None` if [`init_metrics`] has not been called.
pub fn prometheus_handle() -> Option<&'static PrometheusHandle> {
    PROMETHEUS_HANDLE.get()
}

/// Axum handler for the `/metrics` endpoint, in Prometheus exposition format.
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|h| h.render())
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricsError {
    Disabled,
    AlreadyInitialized,
    InstallFailed(String),
}

impl std::fmt::Display for MetricsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricsError::Disabled => write!(f, "metrics are disabled"),
            MetricsError::AlreadyInitialized => write!(f, "metrics recorder already initialized"),
            MetricsError::InstallFailed(e) => {
                write!(f, "failed to install metrics recorder: {}", e)
            }
        }
    }
}

impl std::error::Error for MetricsError {}

// =============================================================================
// Business Metrics Helpers
// =============================================================================

/// Increments `flightpath_routes_calculated_total`.
pub fn record_route_calculated(algorithm: &str) {
    metrics::counter!(
        "flightpath_routes_calculated_total",
        "algorithm" => algorithm.to_string()
    )
    .increment(1);
}

/// Increments `flightpath_routes_failed_total`.
///
/// `reason` is one of the labels produced by [`crate::failure_reason`],
/// e.g. "no_path", "unknown_airport" or "validation_error".
pub fn record_route_failed(reason: &str) {
    metrics::counter!(
        "flightpath_routes_failed_total",
        "reason" => reason.to_string()
    )
    .increment(1);
}

/// Records leg counts of a found route to the `flightpath_route_legs`
/// histogram, split by leg kind.
pub fn record_route_legs(flights: usize, ground_hops: usize) {
    metrics::histogram!("flightpath_route_legs", "kind" => "flight").record(flights as f64);
    metrics::histogram!("flightpath_route_legs", "kind" => "ground").record(ground_hops as f64);
}

/// Increments `flightpath_airport_lookups_total`.
pub fn record_airport_lookup(found: bool) {
    let outcome = if found { "found" } else { "unknown" };
    metrics::counter!(
        "flightpath_airport_lookups_total",
        "outcome" => outcome
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = MetricsConfig::from_lookup(|_| None);
        assert!(config.enabled);
        assert_eq!(config.path, "/metrics");
    }

    #[test]
    fn config_overrides() {
        let config = MetricsConfig::from_lookup(|key| match key {
            METRICS_ENABLED_ENV => Some("FALSE".to_string()),
            METRICS_PATH_ENV => Some("/internal/metrics".to_string()),
            _ => None,
        });
        assert!(!config.enabled);
        assert_eq!(config.path, "/internal/metrics");
    }

    #[test]
    fn disabled_config_is_rejected() {
        let config = MetricsConfig {
            enabled: false,
            ..MetricsConfig::default()
        };
        assert_eq!(init_metrics(&config), Err(MetricsError::Disabled));
    }

    #[test]
    fn handler_returns_exposition_text() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let output = rt.block_on(metrics_handler());
        assert!(output.contains('#') || output.is_empty());
    }

    #[test]
    fn business_helpers_do_not_panic_without_recorder() {
        record_route_calculated("a-star");
        record_route_failed("no_path");
        record_route_legs(3, 1);
        record_airport_lookup(true);
        record_airport_lookup(false);
    }

    #[test]
    fn error_display() {
        assert_eq!(MetricsError::Disabled.to_string(), "metrics are disabled");
        assert_eq!(
            MetricsError::AlreadyInitialized.to_string(),
            "metrics recorder already initialized"
        );
        let failed = MetricsError::InstallFailed("test error".to_string());
        assert!(failed.to_string().contains("test error"));
    }
}
